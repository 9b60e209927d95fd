pub const TITLE_MAX: usize = 200;
pub const DESCRIPTION_MAX: usize = 1000;

// Same rules for both contracts; `field` is "title" or "label".
pub fn check_entry(field: &str, title: &str, description: &str) -> Vec<String> {
    let mut errors = Vec::new();

    if title.trim().is_empty() {
        errors.push(format!("'{field}' cannot be empty"));
    } else if title.trim().chars().count() > TITLE_MAX {
        errors.push(format!("'{field}' must be {TITLE_MAX} characters or less"));
    }

    if description.chars().count() > DESCRIPTION_MAX {
        errors.push(format!(
            "'description' must be {DESCRIPTION_MAX} characters or less"
        ));
    }

    errors
}

pub fn check_task(title: &str, description: &str) -> Vec<String> {
    check_entry("title", title, description)
}

pub fn check_todo(label: &str, description: &str) -> Vec<String> {
    check_entry("label", label, description)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_title_is_rejected() {
        let errors = check_task("", "");
        assert_eq!(errors, vec!["'title' cannot be empty".to_string()]);
    }

    #[test]
    fn whitespace_title_is_rejected() {
        let errors = check_task("   \t", "notes");
        assert_eq!(errors.len(), 1);
        assert!(errors[0].contains("cannot be empty"));
    }

    #[test]
    fn overlong_fields_are_rejected_together() {
        let title = "t".repeat(TITLE_MAX + 1);
        let description = "d".repeat(DESCRIPTION_MAX + 1);
        let errors = check_task(&title, &description);
        assert_eq!(errors.len(), 2);
        assert!(errors[0].contains("200 characters"));
        assert!(errors[1].contains("1000 characters"));
    }

    #[test]
    fn reasonable_entry_passes() {
        assert!(check_task("Buy milk", "two liters").is_empty());
        assert!(check_todo("Buy milk", "").is_empty());
    }

    #[test]
    fn todo_errors_name_the_label_field() {
        let errors = check_todo(" ", "");
        assert_eq!(errors, vec!["'label' cannot be empty".to_string()]);
    }
}
