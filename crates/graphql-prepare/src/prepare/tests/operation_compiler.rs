use crate::ast;
use crate::document::Document;
use crate::prepare::prepare;
use crate::prepare::ArgumentError;
use crate::prepare::PrepareError;
use crate::prepare::PrepareOptions;
use crate::prepare::PreparedOperation;
use crate::prepare::PreparedSelectionList;
use crate::prepare::VisibilityDirective;
use crate::schema::Schema;
use crate::schema::SchemaBuilder;
use crate::value::Value;
use indexmap::IndexMap;

fn setup_schema() -> Schema {
    SchemaBuilder::from_str(
        concat!(
            "type Query {\n",
            "  pet: Pet\n",
            "  pets(limit: Int = 10): [Pet]\n",
            "  human(id: ID!): Human\n",
            "  nearby(radius: Float): [Pet]\n",
            "}\n",
            "interface Pet { name: String }\n",
            "type Dog implements Pet { name: String, barkVolume: Int }\n",
            "type Cat implements Pet { name: String, meowVolume: Int }\n",
            "type Human { name: String, pets: [Pet] }\n",
        ),
        None,
    ).and_then(SchemaBuilder::build).expect("fixture schema builds")
}

fn prepare_one<'doc, 'schema>(
    schema: &'schema Schema,
    document: &'doc Document,
) -> PreparedOperation<'doc, 'schema> {
    prepare(schema, document, None, &PrepareOptions::default())
        .expect("fixture operation prepares")
}

fn response_keys(list: &PreparedSelectionList<'_, '_>) -> Vec<String> {
    list.iter()
        .map(|selection| selection.response_key().to_string())
        .collect()
}

mod operation_selection {
    use super::*;

    #[test]
    fn named_lookup() {
        let schema = setup_schema();
        let document = Document::parse(
            concat!(
                "query A { pet { name } }\n",
                "query B { pets { name } }\n",
            ),
            None,
        ).unwrap();

        let operation = prepare(
            &schema,
            &document,
            Some("B"),
            &PrepareOptions::default(),
        ).unwrap();
        assert_eq!(operation.name(), Some("B"));
        assert_eq!(
            response_keys(operation.get_root_selections()),
            vec!["pets"],
        );
    }

    #[test]
    fn unnamed_lookup_needs_a_single_operation() {
        let schema = setup_schema();
        let document = Document::parse(
            concat!(
                "query A { pet { name } }\n",
                "query B { pets { name } }\n",
            ),
            None,
        ).unwrap();

        let err = prepare(&schema, &document, None, &PrepareOptions::default())
            .unwrap_err();
        assert!(matches!(
            err,
            PrepareError::OperationNameRequired { operation_count: 2 },
        ));
    }

    #[test]
    fn unknown_name_is_an_error() {
        let schema = setup_schema();
        let document = Document::parse("query A { pet { name } }", None)
            .unwrap();

        let err = prepare(
            &schema,
            &document,
            Some("Missing"),
            &PrepareOptions::default(),
        ).unwrap_err();
        assert!(matches!(err, PrepareError::OperationNotFound { .. }));
    }

    #[test]
    fn invalid_documents_never_reach_compilation() {
        let schema = setup_schema();
        let document = Document::parse("{ definitelyNotAField }", None)
            .unwrap();

        let err = prepare(&schema, &document, None, &PrepareOptions::default())
            .unwrap_err();
        let PrepareError::Validation(result) = err else {
            panic!("expected a validation error, got: {err:?}");
        };
        assert!(result.has_errors());
    }
}

mod selection_merging {
    use super::*;

    #[test]
    fn duplicate_response_keys_merge_recursively() {
        let schema = setup_schema();
        let document = Document::parse(
            concat!(
                "{\n",
                "  human(id: \"1\") { name }\n",
                "  human(id: \"1\") { pets { name } }\n",
                "}\n",
            ),
            None,
        ).unwrap();

        let operation = prepare_one(&schema, &document);
        let root = operation.get_root_selections();
        assert_eq!(response_keys(root), vec!["human"]);

        let human_type = schema
            .type_named("Human").unwrap()
            .as_object().unwrap();
        let merged = root.selections()[0].selection_set().unwrap();
        let merged_list = merged.selections_for(human_type).unwrap();
        assert_eq!(response_keys(merged_list), vec!["name", "pets"]);

        // Both syntactic nested sets resolve to the shared merged list.
        let op_def = operation.definition();
        let root_node = ast::query::operation_selection_set(op_def);
        let mut nested_nodes = root_node.items.iter().map(|item| {
            let graphql_parser::query::Selection::Field(field) = item else {
                panic!("fixture selects plain fields at the root");
            };
            &field.selection_set
        });
        let first = operation.get_selections(
            nested_nodes.next().unwrap(),
            human_type,
        );
        let second = operation.get_selections(
            nested_nodes.next().unwrap(),
            human_type,
        );
        assert!(std::ptr::eq(first, second));
        assert_eq!(first.len(), 2);
    }

    #[test]
    fn aliases_keep_occurrences_apart() {
        let schema = setup_schema();
        let document = Document::parse(
            "{ a: pet { name } b: pet { name } }",
            None,
        ).unwrap();

        let operation = prepare_one(&schema, &document);
        assert_eq!(
            response_keys(operation.get_root_selections()),
            vec!["a", "b"],
        );
    }

    #[test]
    fn interface_selections_narrow_per_concrete_type() {
        let schema = setup_schema();
        let document = Document::parse(
            concat!(
                "{\n",
                "  pet {\n",
                "    name\n",
                "    ... on Dog { barkVolume }\n",
                "    ... on Cat { meowVolume }\n",
                "  }\n",
                "}\n",
            ),
            None,
        ).unwrap();

        let operation = prepare_one(&schema, &document);
        let pet_set = operation.get_root_selections()
            .selections()[0]
            .selection_set().unwrap();

        let type_names: Vec<_> = pet_set.possible_types()
            .iter()
            .map(|obj| obj.name().to_string())
            .collect();
        assert_eq!(type_names, vec!["Dog", "Cat"]);

        let dog = schema.type_named("Dog").unwrap().as_object().unwrap();
        let cat = schema.type_named("Cat").unwrap().as_object().unwrap();
        assert_eq!(
            response_keys(pet_set.selections_for(dog).unwrap()),
            vec!["name", "barkVolume"],
        );
        assert_eq!(
            response_keys(pet_set.selections_for(cat).unwrap()),
            vec!["name", "meowVolume"],
        );
    }

    #[test]
    fn fragments_are_spliced_away() {
        let schema = setup_schema();
        let document = Document::parse(
            concat!(
                "query GetPet { pet { ...petFields } }\n",
                "fragment petFields on Pet { name, ... on Dog { barkVolume } }\n",
            ),
            None,
        ).unwrap();

        let operation = prepare_one(&schema, &document);
        let pet_set = operation.get_root_selections()
            .selections()[0]
            .selection_set().unwrap();

        let dog = schema.type_named("Dog").unwrap().as_object().unwrap();
        assert_eq!(
            response_keys(pet_set.selections_for(dog).unwrap()),
            vec!["name", "barkVolume"],
        );
    }

    #[test]
    fn unknown_lookups_degrade_to_an_empty_list() {
        let schema = setup_schema();
        let document = Document::parse("{ pet { name } }", None).unwrap();
        let other_document = Document::parse("{ pets { name } }", None)
            .unwrap();

        let operation = prepare_one(&schema, &document);
        let foreign_node = ast::query::operation_selection_set(
            other_document.operations().next().unwrap(),
        );
        let list = operation.get_selections(
            foreign_node,
            schema.query_type(),
        );
        assert!(list.is_empty());
        assert!(list.is_final());
    }

    #[test]
    fn conflicting_fields_under_one_response_key_are_rejected() {
        let schema = setup_schema();
        let document = Document::parse(
            concat!(
                "{\n",
                "  a: pet { name }\n",
                "  a: human(id: \"1\") { pets { name } }\n",
                "}\n",
            ),
            None,
        ).unwrap();

        let result = prepare(
            &schema,
            &document,
            None,
            &PrepareOptions::default(),
        );
        assert!(matches!(
            result,
            Err(PrepareError::FieldConflict {
                ref first_field,
                ref response_key,
                ref second_field,
                ..
            }) if first_field == "pet"
                && response_key == "a"
                && second_field == "human"
        ));
    }
}

mod visibility {
    use super::*;

    #[test]
    fn constant_conditions_fold_statically() {
        let schema = setup_schema();
        let document = Document::parse(
            concat!(
                "{\n",
                "  pet @include(if: true) { name }\n",
                "  pets @skip(if: true) { name }\n",
                "  human(id: \"1\") @include(if: false) { name }\n",
                "}\n",
            ),
            None,
        ).unwrap();

        let operation = prepare_one(&schema, &document);
        let root = operation.get_root_selections();
        assert_eq!(response_keys(root), vec!["pet"]);
        assert!(root.selections()[0].is_final());
        assert!(root.is_final());
    }

    #[test]
    fn variable_conditions_become_visibility_entries() {
        let schema = setup_schema();
        let document = Document::parse(
            concat!(
                "query Q($s: Boolean!) {\n",
                "  pet @skip(if: $s) { name }\n",
                "  pets { name }\n",
                "}\n",
            ),
            None,
        ).unwrap();

        let operation = prepare_one(&schema, &document);
        let root = operation.get_root_selections();
        assert!(!root.is_final());

        let pet = &root.selections()[0];
        assert!(!pet.is_final());
        assert_eq!(pet.visibilities().len(), 1);
        assert_eq!(
            pet.visibilities()[0].directive(),
            VisibilityDirective::Skip,
        );
        assert_eq!(pet.visibilities()[0].variable(), "s");

        let pets = &root.selections()[1];
        assert!(pets.is_final());
    }

    #[test]
    fn fragment_conditions_propagate_to_spliced_fields() {
        let schema = setup_schema();
        let document = Document::parse(
            concat!(
                "query Q($s: Boolean!) { pet { ...petFields @include(if: $s) } }\n",
                "fragment petFields on Pet { name }\n",
            ),
            None,
        ).unwrap();

        let operation = prepare_one(&schema, &document);
        let pet_set = operation.get_root_selections()
            .selections()[0]
            .selection_set().unwrap();
        let dog = schema.type_named("Dog").unwrap().as_object().unwrap();

        let name = &pet_set.selections_for(dog).unwrap().selections()[0];
        assert_eq!(name.visibilities().len(), 1);
        assert_eq!(
            name.visibilities()[0].directive(),
            VisibilityDirective::Include,
        );
    }

    #[test]
    fn merged_occurrences_retain_every_condition() {
        let schema = setup_schema();
        let document = Document::parse(
            concat!(
                "query Q($s: Boolean!, $t: Boolean!) {\n",
                "  pet @skip(if: $s) { name }\n",
                "  pet @skip(if: $t) { name }\n",
                "}\n",
            ),
            None,
        ).unwrap();

        let operation = prepare_one(&schema, &document);
        let pet = &operation.get_root_selections().selections()[0];
        let variables: Vec<_> = pet.visibilities()
            .iter()
            .map(|visibility| visibility.variable().to_string())
            .collect();
        assert_eq!(variables, vec!["s", "t"]);
    }
}

mod arguments {
    use super::*;

    #[test]
    fn defaults_fill_in_as_implicit_and_final() {
        let schema = setup_schema();
        let document = Document::parse("{ pets { name } }", None).unwrap();

        let operation = prepare_one(&schema, &document);
        let pets = &operation.get_root_selections().selections()[0];
        let arguments = pets.arguments();
        assert!(arguments.is_final());
        assert!(!arguments.has_errors());

        let limit = arguments.get("limit").unwrap();
        assert!(limit.is_implicit());
        assert!(limit.is_final());
        assert!(matches!(limit.value(), Some(Value::Int(_))));
    }

    #[test]
    fn literal_arguments_resolve_at_plan_time() {
        let schema = setup_schema();
        let document = Document::parse(
            "{ human(id: \"42\") { name } }",
            None,
        ).unwrap();

        let operation = prepare_one(&schema, &document);
        let human = &operation.get_root_selections().selections()[0];
        assert!(human.arguments().is_final());

        let id = human.arguments().get("id").unwrap();
        assert_eq!(id.value().and_then(Value::as_str), Some("42"));
    }

    #[test]
    fn coercion_substitutes_variables_without_mutating_the_plan() {
        let schema = setup_schema();
        let document = Document::parse(
            "query Q($id: ID!) { human(id: $id) { name } }",
            None,
        ).unwrap();

        let operation = prepare_one(&schema, &document);
        let human = &operation.get_root_selections().selections()[0];
        let arguments = human.arguments();
        assert!(!arguments.is_final());
        assert!(arguments.get("id").unwrap().value().is_none());

        let variables = IndexMap::from([
            ("id".to_string(), Value::String("42".to_string())),
        ]);
        let mut reported = vec![];
        let coerced = arguments
            .try_coerce(&variables, &mut |err| reported.push(err.clone()))
            .expect("coercion succeeds with the variable provided");
        assert!(reported.is_empty());
        assert!(coerced.is_final());
        assert_eq!(
            coerced.get("id").unwrap().value().and_then(Value::as_str),
            Some("42"),
        );

        // The shared plan still awaits substitution.
        assert!(!arguments.is_final());
        assert!(arguments.get("id").unwrap().value().is_none());
    }

    #[test]
    fn missing_variable_reports_exactly_once() {
        let schema = setup_schema();
        let document = Document::parse(
            "query Q($id: ID!) { human(id: $id) { name } }",
            None,
        ).unwrap();

        let operation = prepare_one(&schema, &document);
        let arguments = operation.get_root_selections()
            .selections()[0]
            .arguments();

        let mut reported = vec![];
        let coerced = arguments.try_coerce(
            &IndexMap::new(),
            &mut |err| reported.push(err.clone()),
        );
        assert!(coerced.is_none());
        assert_eq!(reported.len(), 1);
        assert!(matches!(
            &reported[0],
            ArgumentError::MissingVariable { variable_name, .. }
                if variable_name == "id",
        ));
    }

    #[test]
    fn final_maps_are_borrowed_not_cloned() {
        let schema = setup_schema();
        let document = Document::parse(
            "{ human(id: \"42\") { name } }",
            None,
        ).unwrap();

        let operation = prepare_one(&schema, &document);
        let arguments = operation.get_root_selections()
            .selections()[0]
            .arguments();

        let coerced = arguments
            .try_coerce(&IndexMap::new(), &mut |_| {})
            .unwrap();
        assert!(matches!(coerced, std::borrow::Cow::Borrowed(_)));
    }

    #[test]
    fn plan_time_argument_errors_fail_coercion() {
        let schema = setup_schema();
        let operation_sources = [
            // Unknown argument name.
            "{ human(id: \"42\", wrong: 1) { name } }",
            // Missing required argument.
            "{ human { name } }",
            // Literal of the wrong kind.
            "{ pets(limit: \"ten\") { name } }",
        ];

        for source in operation_sources {
            let document = Document::parse(source, None).unwrap();
            let operation = prepare_one(&schema, &document);
            let arguments = operation.get_root_selections()
                .selections()[0]
                .arguments();
            assert!(arguments.has_errors(), "no plan error for: {source}");

            let mut reported = vec![];
            let coerced = arguments.try_coerce(
                &IndexMap::new(),
                &mut |err| reported.push(err.clone()),
            );
            assert!(coerced.is_none(), "coercion passed for: {source}");
            assert_eq!(reported.len(), 1, "wrong report count for: {source}");
        }
    }
}

mod printing {
    use super::*;

    #[test]
    fn print_reprepare_print_is_byte_identical() {
        let schema = setup_schema();
        let document = Document::parse(
            concat!(
                "query GetPet($s: Boolean!) {\n",
                "  pet {\n",
                "    ...petFields\n",
                "    ... on Dog { barkVolume @include(if: $s) }\n",
                "    extra: name @skip(if: true)\n",
                "  }\n",
                "}\n",
                "fragment petFields on Pet { name }\n",
            ),
            None,
        ).unwrap();

        let operation = prepare_one(&schema, &document);
        let first_print = operation.print();

        let reparsed = Document::parse(&first_print, None)
            .expect("printed plans are re-parseable");
        let reprepared = prepare_one(&schema, &reparsed);
        assert_eq!(reprepared.print(), first_print);
        assert_eq!(reprepared.id(), operation.id());
    }

    #[test]
    fn print_splices_and_folds() {
        let schema = setup_schema();
        let document = Document::parse(
            concat!(
                "query GetPet { pet { ...petFields, name @skip(if: true) } }\n",
                "fragment petFields on Pet { name }\n",
            ),
            None,
        ).unwrap();

        let printed = prepare_one(&schema, &document).print();
        assert!(!printed.contains("fragment"));
        assert!(!printed.contains("petFields"));
        assert!(!printed.contains("@skip"));
        assert!(printed.contains("... on Dog"));
        assert!(printed.contains("... on Cat"));
    }

    #[test]
    fn implicit_arguments_are_omitted() {
        let schema = setup_schema();
        let document = Document::parse("{ pets { name } }", None).unwrap();

        let printed = prepare_one(&schema, &document).print();
        assert!(printed.contains("pets {"), "unexpected print: {printed}");
        assert!(!printed.contains("limit"));
    }

    #[test]
    fn float_literals_keep_their_decimal_point() {
        let schema = setup_schema();
        let document = Document::parse(
            "{ nearby(radius: 1.0) { name } }",
            None,
        ).unwrap();

        let operation = prepare_one(&schema, &document);
        let printed = operation.print();
        assert!(printed.contains("radius: 1.0"), "unexpected print: {printed}");

        // A whole-number float printed without its decimal point would
        // re-parse as an Int and change the plan id.
        let reparsed = Document::parse(&printed, None)
            .expect("printed plans are re-parseable");
        let reprepared = prepare_one(&schema, &reparsed);
        assert_eq!(reprepared.id(), operation.id());
    }

    #[test]
    fn equivalent_documents_share_an_id() {
        let schema = setup_schema();
        let compact = Document::parse("{pet{name}}", None).unwrap();
        let spaced = Document::parse(
            "{\n  pet {\n    name\n  }\n}",
            None,
        ).unwrap();

        let first = prepare_one(&schema, &compact);
        let second = prepare_one(&schema, &spaced);
        assert_eq!(first.id(), second.id());
        assert_eq!(first.proposed_task_count(), 1);
    }
}

mod resource_limits {
    use super::*;

    #[test]
    fn depth_limit() {
        let schema = setup_schema();
        let document = Document::parse(
            "{ human(id: \"1\") { pets { name } } }",
            None,
        ).unwrap();

        let options = PrepareOptions {
            max_breadth: 2048,
            max_depth: 2,
        };
        let err = prepare(&schema, &document, None, &options).unwrap_err();
        assert!(matches!(
            err,
            PrepareError::DepthLimitExceeded { limit: 2 },
        ));
    }

    #[test]
    fn breadth_limit() {
        let schema = setup_schema();
        let document = Document::parse(
            "{ pet { name } pets { name } human(id: \"1\") { name } }",
            None,
        ).unwrap();

        let options = PrepareOptions {
            max_breadth: 2,
            max_depth: 64,
        };
        let err = prepare(&schema, &document, None, &options).unwrap_err();
        assert!(matches!(
            err,
            PrepareError::BreadthLimitExceeded { breadth: 3, limit: 2 },
        ));
    }

    #[test]
    fn defaults_accommodate_real_documents() {
        let schema = setup_schema();
        let document = Document::parse(
            "{ human(id: \"1\") { pets { ... on Dog { barkVolume } } } }",
            None,
        ).unwrap();

        prepare(&schema, &document, None, &PrepareOptions::default())
            .expect("well-formed documents prepare with default limits");
    }
}
