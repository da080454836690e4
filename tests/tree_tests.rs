//! Field tree construction, lookup, serialization and render views.

mod common;

use common::{add_instance, blur, path, profile_form, type_into, Form};
use formtree::tree::{
    attr,
    builder::{group, radio, repeatable, repeatable_with, select, text},
    FieldKind, Node, Status,
};
use formtree::value::Value;

fn template() -> Form {
    text([attr::name("v")])
}

fn with_value(value: &'static str) -> impl FnOnce(Form) -> Form {
    move |node| node.update_attributes([attr::value(value)])
}

#[cfg(test)]
mod construction_tests {
    use super::*;

    #[test]
    fn test_setters_fold_left_to_right() {
        let field: Form = text([attr::value("first"), attr::value("second"), attr::class("a"), attr::class("b")]);
        assert_eq!(field.value(), &Value::text("second"));
        assert_eq!(field.attributes().class_list, vec!["a".to_string(), "b".to_string()]);
        assert_eq!(field.status(), Status::Pristine);
        assert!(field.errors().is_empty());
    }

    #[test]
    fn test_repeatable_pads_to_min() {
        let form = repeatable_with([attr::repeatable_min(3)], template(), [with_value("a")]);
        assert_eq!(form.children().len(), 3);
        assert_eq!(form.children()[0].value(), &Value::text("a"));
        assert_eq!(form.children()[1], template());
    }

    #[test]
    fn test_repeatable_keeps_extra_defaults() {
        let form = repeatable_with(
            [attr::repeatable_min(1), attr::repeatable_max(2)],
            template(),
            [with_value("a"), with_value("b"), with_value("c")],
        );
        let values: Vec<&Value> = form.children().iter().map(Node::value).collect();
        assert_eq!(values, vec![&Value::text("a"), &Value::text("b"), &Value::text("c")]);
    }

    #[test]
    fn test_plain_repeatable_defaults_to_one_instance() {
        let form = repeatable([], template());
        assert_eq!(form.children().len(), 1);
        assert!(matches!(form.kind(), FieldKind::Repeatable(_)));
    }
}

#[cfg(test)]
mod lookup_tests {
    use super::*;

    #[test]
    fn test_first_match_in_pre_order_wins() {
        let form: Form = group(
            [],
            [
                group([], [text([attr::identifier("dup"), attr::value("deep")])]),
                text([attr::identifier("dup"), attr::value("shallow")]),
            ],
        );
        assert_eq!(form.find(&"dup").unwrap().value(), &Value::text("deep"));
        assert_eq!(form.find_path(&"dup"), Some(path(&[0, 0])));
    }

    #[test]
    fn test_pre_order_iteration() {
        let form = profile_form();
        let paths: Vec<String> = form.iter().map(|(path, _)| path.to_string()).collect();
        assert_eq!(paths, vec!["/", "/0", "/1", "/2", "/3", "/3/0"]);
    }

    #[test]
    fn test_get_and_update_at() {
        let form = profile_form();
        assert!(form.get(&path(&[3, 0])).is_some());
        assert!(form.get(&path(&[3, 1])).is_none());
        assert!(form.update_at(&path(&[9]), |node| node.clone()).is_none());
    }
}

#[cfg(test)]
mod serde_tests {
    use super::*;

    const DEFINITION: &str = r#"
kind: group
children:
  - kind: text
    name: name
    identifier: name
    required: true
  - kind: select
    name: size
    identifier: size
  - kind:
      repeatable:
        kind: text
        name: tag
    name: tags
    identifier: tags
    repeatable_min: 2
"#;

    #[test]
    fn test_yaml_definition_normalizes() {
        let form: Node<String> = serde_yaml::from_str(DEFINITION).unwrap();
        let form = form.normalized();
        let tags = form.find(&"tags".to_string()).unwrap();
        assert_eq!(tags.children().len(), 2);
        let size = form.find(&"size".to_string()).unwrap();
        assert_eq!(size.errors().len(), 1);
        let name = form.find(&"name".to_string()).unwrap();
        assert_eq!(name.errors().len(), 1);
        assert!(name.visible_errors().is_empty());
    }

    #[test]
    fn test_normalized_fills_an_empty_repeatable() {
        let definition = r#"{"kind": {"repeatable": {"kind": "text", "name": "v"}}, "name": "rows", "repeatable_min": 3}"#;
        let form: Node<String> = serde_json::from_str(definition).unwrap();
        assert!(form.children().is_empty());
        assert_eq!(form.normalized().children().len(), 3);
    }

    #[test]
    fn test_json_serialization_round_trips() {
        let form = type_into(&profile_form(), &[0], "Ada");
        let owned: Node<String> = serde_json::from_value(serde_json::to_value(&form).unwrap()).unwrap();
        assert_eq!(owned.find(&"name".to_string()).unwrap().value(), &Value::text("Ada"));
        assert_eq!(owned.iter().count(), form.iter().count());
    }
}

#[cfg(test)]
mod view_tests {
    use super::*;

    #[test]
    fn test_view_reports_buttons_and_visible_errors() {
        let form = add_instance(&profile_form(), &[3]);
        let form = blur(&form, &[0]);
        let view = form.view();
        assert_eq!(view.kind, "group");
        assert_eq!(view.children[0].errors, vec!["This field is required".to_string()]);
        assert!(view.children[1].errors.is_empty());

        let hobbies = &view.children[3];
        assert_eq!(hobbies.add_button.as_ref().map(|b| b.enabled), Some(true));
        assert_eq!(hobbies.remove_button.as_ref().map(|b| b.enabled), Some(true));
        assert_eq!(hobbies.add_button.as_ref().map(|b| b.copy.as_str()), Some("Add"));
        assert!(view.children[0].add_button.is_none());
    }

    #[test]
    fn test_view_marks_the_selected_option() {
        let form: Form = radio([
            attr::options([("Small", "s"), ("Large", "l")]),
            attr::value("l"),
        ]);
        let view = form.view();
        let selected: Vec<bool> = view.options.iter().map(|o| o.selected).collect();
        assert_eq!(selected, vec![false, true]);
        assert_eq!(view.value.as_deref(), Some("l"));

        let empty: Form = select([]);
        assert_eq!(empty.view().errors, vec!["No options have been provided".to_string()]);
    }
}
