//! Data validation support for XLSX cells

/// Maximum length Excel accepts for a list validation formula.
pub const MAX_LIST_FORMULA_LEN: usize = 255;

/// Data validation rule
///
/// Mirrors the attributes of a `<dataValidation>` element. Type, operator
/// and error style keep their OOXML spellings (`list`, `between`, `stop`, ...).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DataValidation {
    /// Type of validation (`none`, `whole`, `decimal`, `list`, `date`, `time`, `textLength`, `custom`)
    pub validation_type: String,
    /// Operator (`between`, `notBetween`, `equal`, `notEqual`, `greaterThan`, ...)
    pub operator: String,
    /// Cell ranges (e.g., "A1:B2 C3:D4")
    pub sqref: String,
    /// First formula (constraint)
    pub formula1: String,
    /// Second formula (for between/not between)
    pub formula2: String,
    /// Allow blank cells
    pub allow_blank: bool,
    /// Suppress the in-cell dropdown (for list validation)
    pub show_dropdown: bool,
    /// Show input message
    pub show_input_message: bool,
    /// Show error message
    pub show_error_message: bool,
    /// Error style (`stop`, `warning`, `information`)
    pub error_style: Option<String>,
    /// Error message title
    pub error_title: Option<String>,
    /// Error message text
    pub error: Option<String>,
    /// Input message title
    pub prompt_title: Option<String>,
    /// Input message text
    pub prompt: Option<String>,
}

impl DataValidation {
    /// Create a new data validation rule
    pub fn new(validation_type: impl Into<String>, sqref: impl Into<String>) -> Self {
        DataValidation {
            validation_type: validation_type.into(),
            sqref: sqref.into(),
            allow_blank: true,
            show_error_message: true,
            ..Default::default()
        }
    }

    /// Create a dropdown list rule over literal items.
    ///
    /// Returns `None` when the quoted, comma-joined list would exceed
    /// [`MAX_LIST_FORMULA_LEN`].
    pub fn list(sqref: impl Into<String>, items: &[&str]) -> Option<Self> {
        let formula = format!("\"{}\"", items.join(","));
        if formula.len() > MAX_LIST_FORMULA_LEN {
            return None;
        }
        Some(DataValidation {
            formula1: formula,
            ..Self::new("list", sqref)
        })
    }

    /// Set the message shown when the cell is selected.
    pub fn set_input(&mut self, title: Option<String>, message: Option<String>) {
        self.show_input_message = true;
        self.prompt_title = title;
        self.prompt = message;
    }

    /// Set the message shown when an invalid value is entered.
    pub fn set_error(
        &mut self,
        style: impl Into<String>,
        title: Option<String>,
        message: Option<String>,
    ) {
        self.show_error_message = true;
        self.error_style = Some(style.into());
        self.error_title = title;
        self.error = message;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_list_validation() {
        let dv = DataValidation::list("A1:A10", &["red", "green", "blue"]).unwrap();
        assert_eq!(dv.validation_type, "list");
        assert_eq!(dv.formula1, "\"red,green,blue\"");
        assert_eq!(dv.sqref, "A1:A10");
        assert!(dv.allow_blank);
    }

    #[test]
    fn test_list_too_long() {
        let item = "x".repeat(200);
        assert!(DataValidation::list("A1", &[item.as_str(), item.as_str()]).is_none());
    }

    #[test]
    fn test_messages() {
        let mut dv = DataValidation::new("whole", "B2");
        dv.set_input(Some("Count".into()), Some("Enter a whole number".into()));
        dv.set_error("warning", None, Some("Not a number".into()));
        assert!(dv.show_input_message);
        assert_eq!(dv.prompt.as_deref(), Some("Enter a whole number"));
        assert_eq!(dv.error_style.as_deref(), Some("warning"));
        assert_eq!(dv.error_title, None);
    }
}
