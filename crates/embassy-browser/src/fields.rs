//! Form-field discovery.
//!
//! A script run in the page enumerates form-bearing elements and reports one
//! record per control, including an inferred label and a layout-based
//! visibility flag.

use serde::{Deserialize, Serialize};

/// One discovered form control.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FormField {
    pub index: u32,
    pub tag: String,
    #[serde(rename = "type")]
    pub field_type: String,
    pub name: String,
    pub id: String,
    pub placeholder: String,
    pub value: String,
    pub label: String,
    pub visible: bool,
    pub required: bool,
}

/// Enumerates `input`, `select`, `textarea` and `button` elements. Labels are
/// inferred from an explicit `label[for]` association first, then from the
/// closest ancestor `<label>`. Visibility follows layout presence
/// (`offsetParent`).
pub const DISCOVER_FIELDS_SCRIPT: &str = r#"(() => {
    const fields = [];
    const controls = document.querySelectorAll('input, select, textarea, button');

    controls.forEach((element, index) => {
        const field = {
            index: index,
            tag: element.tagName.toLowerCase(),
            type: element.type || 'text',
            name: element.name || '',
            id: element.id || '',
            placeholder: element.placeholder || '',
            value: element.value || '',
            label: '',
            visible: element.offsetParent !== null,
            required: element.required || false
        };

        if (element.id) {
            const label = document.querySelector(`label[for="${CSS.escape(element.id)}"]`);
            if (label) field.label = label.textContent.trim();
        }

        if (!field.label) {
            const wrapper = element.closest('label');
            if (wrapper) field.label = wrapper.textContent.trim();
        }

        fields.push(field);
    });

    return fields;
})()"#;

/// Keep only fields present in layout.
pub fn visible_fields(fields: &[FormField]) -> Vec<FormField> {
    fields.iter().filter(|f| f.visible).cloned().collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn field(index: u32, visible: bool) -> FormField {
        FormField {
            index,
            tag: "input".to_string(),
            field_type: "text".to_string(),
            name: format!("field{}", index),
            id: String::new(),
            placeholder: String::new(),
            value: String::new(),
            label: String::new(),
            visible,
            required: false,
        }
    }

    #[test]
    fn test_deserialize_page_payload() {
        let json = serde_json::json!([{
            "index": 0,
            "tag": "input",
            "type": "email",
            "name": "username",
            "id": "user",
            "placeholder": "Email",
            "value": "",
            "label": "Email address",
            "visible": true,
            "required": true
        }]);
        let fields: Vec<FormField> = serde_json::from_value(json).unwrap();
        assert_eq!(fields.len(), 1);
        assert_eq!(fields[0].field_type, "email");
        assert!(fields[0].required);
    }

    #[test]
    fn test_type_field_renames_on_serialize() {
        let json = serde_json::to_value(field(0, true)).unwrap();
        assert!(json.get("type").is_some());
        assert!(json.get("field_type").is_none());
    }

    #[test]
    fn test_visible_fields_filters_hidden() {
        let all = vec![field(0, true), field(1, false), field(2, true)];
        let visible = visible_fields(&all);
        assert_eq!(visible.len(), 2);
        assert!(visible.iter().all(|f| f.visible));
        // totals stay derivable from both collections
        assert_eq!(all.len() - visible.len(), 1);
    }

    #[test]
    fn test_discover_script_is_an_expression() {
        // Runtime.evaluate needs an expression, not a function body.
        assert!(DISCOVER_FIELDS_SCRIPT.trim_start().starts_with("(() => {"));
        assert!(DISCOVER_FIELDS_SCRIPT.trim_end().ends_with("})()"));
    }
}
