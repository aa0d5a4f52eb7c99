use serde::Deserialize;

// Every field is optional so an absent key is reported as a missing field,
// not as a JSON rejection.

#[derive(Debug, Deserialize, Default)]
pub struct CredentialsForm {
    pub usuario: Option<String>,
    pub contrasena: Option<String>,
}

#[derive(Debug, Deserialize, Default)]
pub struct NewTaskForm {
    pub titulo: Option<String>,
    pub descripcion: Option<String>,
}

#[derive(Debug, Deserialize, Default)]
pub struct TaskUpdateForm {
    pub titulo: Option<String>,
    pub descripcion: Option<String>,
}

/// Returns the value only when it is present and not blank.
pub fn provided(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_provided_filters_blank_values() {
        assert_eq!(provided(None), None);
        assert_eq!(provided(Some(String::new())), None);
        assert_eq!(provided(Some("   ".into())), None);
        assert_eq!(provided(Some("ana".into())), Some("ana".to_string()));
    }

    #[test]
    fn test_forms_accept_missing_keys() {
        let form: CredentialsForm = serde_json::from_str(r#"{"usuario":"ana"}"#).unwrap();
        assert_eq!(form.usuario.as_deref(), Some("ana"));
        assert!(form.contrasena.is_none());

        let form: TaskUpdateForm = serde_json::from_str("{}").unwrap();
        assert!(form.titulo.is_none() && form.descripcion.is_none());
    }
}
