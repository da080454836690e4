//! JSON bridge tests: export nesting, name paths and import.

mod common;

use common::{add_instance, items_form, nested_form, path, profile_form, type_into, Form};
use formtree::errors::FieldError;
use formtree::json::{names_to_paths, to_json, update_values_from_json, update_values_from_json_with, ImportOptions};
use formtree::tree::{
    attr,
    builder::{checkbox, group, int, repeatable, select, text},
};
use formtree::value::Value;
use serde_json::json;

#[cfg(test)]
mod export_tests {
    use super::*;

    #[test]
    fn test_unnamed_groups_inline_and_named_groups_nest() {
        assert_eq!(to_json(&nested_form()), Ok(json!({"a": "x", "g": {"b": "y"}})));
    }

    #[test]
    fn test_repeatable_exports_an_array_of_objects() {
        let form = add_instance(&add_instance(&items_form(), &[]), &[]);
        let form = type_into(&form, &[0], "p");
        let form = type_into(&form, &[1], "q");
        assert_eq!(to_json(&form), Ok(json!({"items": [{"v": "p"}, {"v": "q"}]})));
    }

    #[test]
    fn test_typed_leaves() {
        let form: Form = group(
            [],
            [
                int([attr::name("n"), attr::value(3)]),
                checkbox([attr::name("c"), attr::value(true)]),
                text([attr::name("t")]),
            ],
        );
        assert_eq!(to_json(&form), Ok(json!({"n": 3, "c": true, "t": null})));
    }

    #[test]
    fn test_unnamed_repeatable_has_no_name() {
        let form: Form = group([], [repeatable([attr::identifier("r")], text([attr::name("v")]))]);
        assert_eq!(to_json(&form), Err(FieldError::HasNoName(Some("r"))));
    }

    #[test]
    fn test_unnamed_leaf_under_named_group() {
        let form: Form = group(
            [attr::name("g")],
            [text([attr::identifier("anon"), attr::value("x")])],
        );
        assert_eq!(to_json(&form), Err(FieldError::HasNoName(Some("anon"))));
    }

    #[test]
    fn test_unnamed_leaf_at_top_level_is_skipped() {
        let form: Form = group([], [text([attr::value("x")]), text([attr::name("b"), attr::value("y")])]);
        assert_eq!(to_json(&form), Ok(json!({"b": "y"})));
    }
}

#[cfg(test)]
mod import_tests {
    use super::*;

    #[test]
    fn test_names_to_paths_in_pre_order() {
        let form = add_instance(&profile_form(), &[3]);
        let names: Vec<(String, Vec<usize>)> = names_to_paths(&form)
            .into_iter()
            .map(|(name, path)| (name, path.indices().to_vec()))
            .collect();
        assert_eq!(
            names,
            vec![
                ("name".to_string(), vec![0]),
                ("email".to_string(), vec![1]),
                ("age".to_string(), vec![2]),
                ("hobbies.0.hobby".to_string(), vec![3, 0]),
                ("hobbies.1.hobby".to_string(), vec![3, 1]),
            ]
        );
    }

    #[test]
    fn test_repeatable_round_trip() {
        let exported = json!({"items": [{"v": "p"}, {"v": "q"}]});
        let imported = update_values_from_json(&items_form(), &exported).unwrap();
        assert_eq!(imported.children().len(), 2);
        assert_eq!(imported.children()[0].value(), &Value::text("p"));
        assert_eq!(imported.children()[1].value(), &Value::text("q"));
        assert_eq!(to_json(&imported), Ok(exported));
    }

    #[test]
    fn test_import_coerces_and_validates() {
        let data = json!({"name": "Ada", "age": 200, "email": null, "hobbies": [{"hobby": "chess"}]});
        let imported = update_values_from_json(&profile_form(), &data).unwrap();
        assert_eq!(imported.find(&"name").unwrap().value(), &Value::text("Ada"));
        assert_eq!(imported.find(&"email").unwrap().value(), &Value::Blank);
        let age = imported.find(&"age").unwrap();
        assert_eq!(age.value(), &Value::Integer(200));
        assert!(matches!(age.errors(), [FieldError::ValueNotInRange { .. }]));
    }

    #[test]
    fn test_unknown_key_fails_strict_import() {
        let data = json!({"name": "Ada", "nickname": "A"});
        assert_eq!(
            update_values_from_json(&profile_form(), &data),
            Err(FieldError::CustomError(
                None,
                "No name path: nickname was found".to_string()
            ))
        );
    }

    #[test]
    fn test_lenient_import_skips_unknown_keys() {
        let data = json!({"name": "Ada", "nickname": "A"});
        let imported =
            update_values_from_json_with(&profile_form(), &data, ImportOptions { strict: false })
                .unwrap();
        assert_eq!(imported.find(&"name").unwrap().value(), &Value::text("Ada"));
    }

    #[test]
    fn test_repeatable_growth_is_clamped() {
        let data = json!({"hobbies": [{"hobby": "a"}, {"hobby": "b"}, {"hobby": "c"}, {"hobby": "d"}]});
        assert_eq!(
            update_values_from_json(&profile_form(), &data),
            Err(FieldError::CustomError(
                None,
                "No name path: hobbies.3.hobby was found".to_string()
            ))
        );

        let shrunk = update_values_from_json(&profile_form(), &json!({"hobbies": []})).unwrap();
        assert_eq!(shrunk.find(&"hobbies").unwrap().children().len(), 1);
    }

    #[test]
    fn test_repeatable_grows_from_no_instances() {
        assert!(items_form().children().is_empty());
        let data = json!({"items": [{"v": "a"}, {"v": "b"}, {"v": "c"}]});
        let imported = update_values_from_json(&items_form(), &data).unwrap();
        let values: Vec<&Value> = imported.children().iter().map(|child| child.value()).collect();
        assert_eq!(values, vec![&Value::text("a"), &Value::text("b"), &Value::text("c")]);
    }

    #[test]
    fn test_repeatable_shrinks_to_the_array_length() {
        let form = add_instance(&add_instance(&profile_form(), &[3]), &[3]);
        assert_eq!(form.find(&"hobbies").unwrap().children().len(), 3);

        let imported = update_values_from_json(&form, &json!({"hobbies": [{"hobby": "x"}]})).unwrap();
        let hobbies = imported.find(&"hobbies").unwrap();
        assert_eq!(hobbies.children().len(), 1);
        assert_eq!(hobbies.children()[0].value(), &Value::text("x"));
    }

    #[test]
    fn test_select_imports_by_option_value() {
        let form: Form = select([
            attr::name("size"),
            attr::identifier("size"),
            attr::options([("Small", "s"), ("Large", "l")]),
        ]);
        let form = group([], [form]);
        let imported = update_values_from_json(&form, &json!({"size": "l"})).unwrap();
        assert_eq!(imported.find(&"size").unwrap().value(), &Value::text("l"));
        assert_eq!(to_json(&imported), Ok(json!({"size": "l"})));
    }

    #[test]
    fn test_import_leaves_other_fields_alone() {
        let form = type_into(&profile_form(), &[0], "Ada");
        let imported = update_values_from_json(&form, &json!({"age": 3})).unwrap();
        assert_eq!(imported.get(&path(&[0])).unwrap().value(), &Value::text("Ada"));
    }
}
