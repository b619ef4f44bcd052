mod document_validator;
