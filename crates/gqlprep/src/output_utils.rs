pub(crate) const GREEN_CHECK: &str = "\x1b[32m\u{2714}\x1b[0m";
pub(crate) const RED_X: &str = "\x1b[31m\u{2718}\x1b[0m";
