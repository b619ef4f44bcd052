use crate::document::Document;
use crate::schema::Schema;
use crate::schema::SchemaBuilder;
use crate::validation::DocumentValidator;
use crate::validation::ValidationError;

fn setup_schema() -> Schema {
    SchemaBuilder::from_str(
        concat!(
            "type Query {\n",
            "  pet: Pet\n",
            "  pets(limit: Int = 10): [Pet]\n",
            "  human(id: ID!): Human\n",
            "}\n",
            "interface Pet { name: String }\n",
            "type Dog implements Pet { name: String, barkVolume: Int }\n",
            "type Cat implements Pet { name: String, meowVolume: Int }\n",
            "union CatOrDog = Cat | Dog\n",
            "type Human { name: String, pets: [Pet] }\n",
        ),
        None,
    ).and_then(SchemaBuilder::build).expect("fixture schema builds")
}

fn validate(document_src: &str) -> Vec<ValidationError> {
    let schema = setup_schema();
    let document = Document::parse(document_src, None)
        .expect("fixture document parses");
    DocumentValidator::new().validate(&schema, &document).errors
}

fn assert_valid(document_src: &str) {
    let errors = validate(document_src);
    assert!(
        errors.is_empty(),
        "expected no errors, got: {errors:#?}",
    );
}

mod executable_definitions {
    use super::*;

    #[test]
    fn type_system_definition_in_document() {
        let errors = validate("type Puppy { cuteness: Int }");

        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].rule, "executable-definitions");
    }

    #[test]
    fn operations_and_fragments_are_executable() {
        assert_valid(concat!(
            "query GetPet { pet { ...petName } }\n",
            "fragment petName on Pet { name }\n",
        ));
    }
}

mod operation_name_uniqueness {
    use super::*;

    #[test]
    fn duplicate_operation_names() {
        let errors = validate(concat!(
            "query GetPet { pet { name } }\n",
            "query GetPet { pets { name } }\n",
        ));

        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].rule, "operation-name-uniqueness");
        assert_eq!(
            errors[0].message,
            "There can be only one operation named \"GetPet\".",
        );
        // Both definition sites are cited.
        assert_eq!(errors[0].locations.len(), 2);
    }

    #[test]
    fn distinct_names_are_fine() {
        assert_valid(concat!(
            "query GetPet { pet { name } }\n",
            "query GetPets { pets { name } }\n",
        ));
    }
}

mod lone_anonymous_operation {
    use super::*;

    #[test]
    fn anonymous_operation_with_siblings() {
        let errors = validate(concat!(
            "{ pet { name } }\n",
            "query GetPets { pets { name } }\n",
        ));

        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].rule, "lone-anonymous-operation");
    }

    #[test]
    fn single_anonymous_operation_is_fine() {
        assert_valid("{ pet { name } }");
    }
}

mod known_fragments {
    use super::*;

    #[test]
    fn spread_of_undefined_fragment() {
        let errors = validate("query GetPet { pet { ...missingBits } }");

        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].rule, "known-fragments");
        assert_eq!(errors[0].message, "Unknown fragment \"missingBits\".");
    }

    #[test]
    fn spread_nested_inside_fragment_is_checked() {
        let errors = validate(concat!(
            "query GetPet { pet { ...outer } }\n",
            "fragment outer on Pet { ...alsoMissing }\n",
        ));

        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].message, "Unknown fragment \"alsoMissing\".");
    }
}

mod fragment_cycles {
    use super::*;

    #[test]
    fn self_spread() {
        let errors = validate(concat!(
            "query GetPet { pet { ...petFields } }\n",
            "fragment petFields on Pet { name, ...petFields }\n",
        ));

        assert!(errors.iter().any(|err| err.rule == "fragment-cycles"));
    }

    #[test]
    fn mutual_cycle() {
        let errors = validate(concat!(
            "query GetPet { pet { ...a } }\n",
            "fragment a on Pet { name, ...b }\n",
            "fragment b on Pet { name, ...a }\n",
        ));

        assert!(errors.iter().any(|err| err.rule == "fragment-cycles"));
    }

    #[test]
    fn diamond_reuse_is_not_a_cycle() {
        assert_valid(concat!(
            "query GetPet { pet { ...left, ...right } }\n",
            "fragment left on Pet { ...shared }\n",
            "fragment right on Pet { ...shared }\n",
            "fragment shared on Pet { name }\n",
        ));
    }
}

mod field_selections {
    use super::*;

    #[test]
    fn unknown_field_on_type() {
        let errors = validate("{ pet { wingSpan } }");

        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].rule, "field-selections");
        assert_eq!(
            errors[0].message,
            "Cannot query field \"wingSpan\" on type \"Pet\".",
        );
    }

    #[test]
    fn leaf_field_with_subselection() {
        let errors = validate("{ pet { name { length } } }");

        assert_eq!(errors.len(), 1);
        assert!(errors[0].message.contains("must not have a selection"));
    }

    #[test]
    fn composite_field_without_subselection() {
        let errors = validate("{ pet }");

        assert_eq!(errors.len(), 1);
        assert!(
            errors[0].message.contains("must have a selection of subfields"),
        );
    }

    #[test]
    fn impossible_fragment_spread() {
        let errors = validate(concat!(
            "{ human { ...dogFields } }\n",
            "fragment dogFields on Dog { barkVolume }\n",
        ));

        assert_eq!(errors.len(), 1);
        assert_eq!(
            errors[0].message,
            "Fragment on type \"Dog\" can never apply within a selection \
            on type \"Human\".",
        );
    }

    #[test]
    fn interface_narrowing_spread_is_fine() {
        assert_valid(concat!(
            "{ pet { name, ... on Dog { barkVolume } } }\n",
        ));
    }

    #[test]
    fn direct_field_on_union() {
        let errors = validate(concat!(
            "query Q($id: ID!) { human(id: $id) { pets { name } } }\n",
            "{ pet { ... on CatOrDog { name } } }\n",
        ));

        // The second (anonymous) operation coexisting with `Q` also trips
        // the lone-anonymous-operation rule; the union error is the one
        // attributed to field-selections.
        let union_errors: Vec<_> = errors.iter()
            .filter(|err| err.rule == "field-selections")
            .collect();
        assert_eq!(union_errors.len(), 1);
        assert!(union_errors[0].message.contains("union type \"CatOrDog\""));
    }

    #[test]
    fn introspection_fields_are_exempt() {
        assert_valid("{ __typename, pet { __typename, name } }");
    }
}

mod rule_independence {
    use super::*;

    // Distinct violations across distinct rules are all reported in one
    // pass, in rule registration order.
    #[test]
    fn multiple_independent_errors_are_all_reported() {
        let errors = validate(concat!(
            "query Dup { pet { wingSpan } }\n",
            "query Dup { pets { ...ghost } }\n",
        ));

        assert!(errors.iter().any(|err| err.rule == "operation-name-uniqueness"));
        assert!(errors.iter().any(|err| err.rule == "known-fragments"));
        assert!(errors.iter().any(|err| err.rule == "field-selections"));
        assert_eq!(errors.len(), 3);
    }

    #[test]
    fn empty_validator_accepts_anything() {
        let schema = setup_schema();
        let document = Document::parse(
            "{ definitelyNotAField }",
            None,
        ).expect("fixture document parses");

        let result = DocumentValidator::empty().validate(&schema, &document);
        assert!(!result.has_errors());
    }
}
