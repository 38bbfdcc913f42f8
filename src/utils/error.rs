use thiserror::Error;

/// 解析食譜圖時的失敗分類，每次呼叫最多回傳一種
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ResolutionError {
    #[error("Recipe '{recipe}' requires unknown item '{item}'")]
    MissingItem { recipe: String, item: String },

    #[error("Recipe cycle detected: {}", path.join(" -> "))]
    Cycle { path: Vec<String> },

    #[error("Recipe nesting exceeds the depth limit of {limit}")]
    DepthExceeded { limit: usize },

    #[error("Quantity overflow while expanding '{item}'")]
    QuantityOverflow { item: String },
}

#[derive(Error, Debug)]
pub enum CookbookError {
    #[error("Invalid name: '{input}'")]
    InvalidName { input: String },

    #[error("Entry '{name}' already exists (entry names must be unique)")]
    DuplicateEntry { name: String },

    #[error("Recipe '{recipe}' lists required item '{item}' more than once")]
    DuplicateRequiredItem { recipe: String, item: String },

    #[error("Invalid cook time {cook_time} for '{name}' (cook time >= 0)")]
    InvalidCookTime { name: String, cook_time: i64 },

    #[error("Invalid quantity {quantity} for '{item}' in recipe '{recipe}' (quantity >= 1)")]
    InvalidQuantity {
        recipe: String,
        item: String,
        quantity: i64,
    },

    #[error("Invalid entry type '{value}' (not recipe or ingredient)")]
    InvalidEntryType { value: String },

    #[error("Invalid request body: {reason}")]
    InvalidPayload { reason: String },

    #[error("Missing required field: {field}")]
    MissingField { field: String },

    #[error("Entry '{name}' not found")]
    EntryNotFound { name: String },

    #[error("Entry '{name}' is not a recipe")]
    NotARecipe { name: String },

    #[error("Resolution failed: {0}")]
    Resolution(#[from] ResolutionError),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Validation error in '{field}': {reason}")]
    ValidationError { field: String, reason: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    /// 使用者輸入的條目定義不合法
    Admission,
    /// 查詢的名稱不存在或類型不符
    Lookup,
    /// 食譜圖本身有問題
    Resolution,
    Configuration,
    System,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    Medium,
    High,
    Critical,
}

impl CookbookError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            CookbookError::InvalidName { .. }
            | CookbookError::DuplicateEntry { .. }
            | CookbookError::DuplicateRequiredItem { .. }
            | CookbookError::InvalidCookTime { .. }
            | CookbookError::InvalidQuantity { .. }
            | CookbookError::InvalidEntryType { .. }
            | CookbookError::InvalidPayload { .. }
            | CookbookError::MissingField { .. } => ErrorCategory::Admission,
            CookbookError::EntryNotFound { .. } | CookbookError::NotARecipe { .. } => {
                ErrorCategory::Lookup
            }
            CookbookError::Resolution(_) => ErrorCategory::Resolution,
            CookbookError::ConfigError { .. } | CookbookError::ValidationError { .. } => {
                ErrorCategory::Configuration
            }
            CookbookError::IoError(_) | CookbookError::SerializationError(_) => {
                ErrorCategory::System
            }
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self.category() {
            ErrorCategory::Lookup => ErrorSeverity::Medium,
            ErrorCategory::Admission | ErrorCategory::Resolution => ErrorSeverity::High,
            ErrorCategory::Configuration => ErrorSeverity::High,
            ErrorCategory::System => ErrorSeverity::Critical,
        }
    }

    /// 給終端使用者看的訊息，不含內部細節
    pub fn user_friendly_message(&self) -> String {
        match self {
            CookbookError::InvalidName { .. } => "this string is cooked".to_string(),
            CookbookError::DuplicateEntry { .. } => {
                "Error: entry already exists! (entry names must be unique)".to_string()
            }
            CookbookError::DuplicateRequiredItem { .. } => {
                "Error: duplicated required item in recipe!".to_string()
            }
            CookbookError::InvalidCookTime { .. } => {
                "Error: invalid cook time! (cook time >= 0)".to_string()
            }
            CookbookError::InvalidQuantity { .. } => {
                "Error: invalid quantity! (quantity >= 1)".to_string()
            }
            CookbookError::InvalidEntryType { .. } => {
                "Error: invalid type! (not recipe or ingredient)".to_string()
            }
            CookbookError::InvalidPayload { reason } => format!("Error: malformed body ({})", reason),
            CookbookError::MissingField { field } => format!("Error: missing field '{}'", field),
            CookbookError::EntryNotFound { .. } | CookbookError::NotARecipe { .. } => {
                "Error: name not found or is not a recipe!".to_string()
            }
            CookbookError::Resolution(ResolutionError::MissingItem { .. }) => {
                "Recipe contains unknown items".to_string()
            }
            CookbookError::Resolution(ResolutionError::Cycle { .. }) => {
                "Recipe requires itself".to_string()
            }
            CookbookError::Resolution(ResolutionError::DepthExceeded { .. }) => {
                "Recipe is nested too deeply".to_string()
            }
            CookbookError::Resolution(ResolutionError::QuantityOverflow { .. }) => {
                "Recipe quantities are too large".to_string()
            }
            other => other.to_string(),
        }
    }

    pub fn recovery_suggestion(&self) -> String {
        match self {
            CookbookError::InvalidName { .. } => {
                "Use a name containing at least one letter".to_string()
            }
            CookbookError::DuplicateEntry { .. } => {
                "Pick a different name or remove the earlier definition".to_string()
            }
            CookbookError::DuplicateRequiredItem { .. } => {
                "Merge the repeated items into one with the combined quantity".to_string()
            }
            CookbookError::InvalidCookTime { .. } => "Use a cook time of 0 or more".to_string(),
            CookbookError::InvalidQuantity { .. } => "Use a quantity of 1 or more".to_string(),
            CookbookError::InvalidEntryType { .. } => {
                "Set type to \"recipe\" or \"ingredient\"".to_string()
            }
            CookbookError::InvalidPayload { .. } => {
                "Send a JSON object with the documented field names and types".to_string()
            }
            CookbookError::MissingField { field } => format!("Provide the '{}' field", field),
            CookbookError::EntryNotFound { .. } => {
                "Add the recipe before asking for its summary".to_string()
            }
            CookbookError::NotARecipe { .. } => {
                "Summaries are only available for recipes".to_string()
            }
            CookbookError::Resolution(ResolutionError::MissingItem { item, .. }) => {
                format!("Add an entry named '{}' to the cookbook", item)
            }
            CookbookError::Resolution(ResolutionError::Cycle { .. }) => {
                "Remove the self-referencing required item".to_string()
            }
            CookbookError::Resolution(ResolutionError::DepthExceeded { .. }) => {
                "Flatten the recipe or raise resolver.max_depth".to_string()
            }
            CookbookError::Resolution(ResolutionError::QuantityOverflow { .. }) => {
                "Reduce the required quantities".to_string()
            }
            CookbookError::IoError(_) => "Check that the file exists and is readable".to_string(),
            CookbookError::SerializationError(_) => "Check the JSON payload format".to_string(),
            CookbookError::ConfigError { .. } | CookbookError::ValidationError { .. } => {
                "Check the configuration file and command-line flags".to_string()
            }
        }
    }
}

pub type Result<T> = std::result::Result<T, CookbookError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolution_errors_are_classified_separately() {
        let missing: CookbookError = ResolutionError::MissingItem {
            recipe: "Pancake".to_string(),
            item: "Milk".to_string(),
        }
        .into();
        let cycle: CookbookError = ResolutionError::Cycle {
            path: vec!["A".to_string(), "B".to_string(), "A".to_string()],
        }
        .into();

        assert_eq!(missing.category(), ErrorCategory::Resolution);
        assert_eq!(cycle.category(), ErrorCategory::Resolution);
        assert_ne!(missing.user_friendly_message(), cycle.user_friendly_message());
        assert_eq!(cycle.to_string(), "Resolution failed: Recipe cycle detected: A -> B -> A");
    }

    #[test]
    fn test_severity_ordering() {
        let lookup = CookbookError::EntryNotFound {
            name: "Soup".to_string(),
        };
        let io = CookbookError::IoError(std::io::Error::other("disk"));
        assert!(lookup.severity() < io.severity());
        assert_eq!(io.severity(), ErrorSeverity::Critical);
    }

    #[test]
    fn test_invalid_payload_is_an_admission_error() {
        let err = CookbookError::InvalidPayload {
            reason: "invalid type: string \"five\", expected i64".to_string(),
        };
        assert_eq!(err.category(), ErrorCategory::Admission);
        assert_eq!(err.severity(), ErrorSeverity::High);
        assert!(err.user_friendly_message().contains("five"));
    }

    #[test]
    fn test_every_severity_has_a_source() {
        let lookup = CookbookError::NotARecipe {
            name: "Egg".to_string(),
        };
        let config = CookbookError::ConfigError {
            message: "bad".to_string(),
        };
        let io = CookbookError::IoError(std::io::Error::other("disk"));
        assert_eq!(lookup.severity(), ErrorSeverity::Medium);
        assert_eq!(config.severity(), ErrorSeverity::High);
        assert_eq!(io.severity(), ErrorSeverity::Critical);
    }
}
