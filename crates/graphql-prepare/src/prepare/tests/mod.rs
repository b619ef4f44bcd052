mod operation_compiler;
