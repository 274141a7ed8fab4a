//! Data model for the census: one record type per report sheet family,
//! plus the sentinel strings substituted for absent values so that keying
//! and display never operate on empty fields.

/// Separator between the components of a routing duplicate key
pub const KEY_SEPARATOR: &str = "_";

/// Stands in for a null/blank duplicate-key component
pub const EMPTY_FIELD: &str = "(empty)";

/// Package sentinel for files with no package declaration
pub const NO_PACKAGE: &str = "(no package)";

/// Superclass sentinel for action classes without an extends clause
pub const NO_SUPERCLASS: &str = "(no superclass)";

/// Sentinel for an impl class without an implements clause
pub const NO_INTERFACES: &str = "(no implemented interfaces)";

/// Name sentinel for an action file whose class name could not be extracted
pub const UNRESOLVED_NAME: &str = "(unresolved)";

/// Remoting marker state and its embedded binding type, extracted together.
///
/// The two are a single correlated probe: an absent marker always reports
/// an unspecified binding, so the pair can never contradict itself.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RemoteServiceMarker {
    Absent,
    Present { binding_type: Option<String> },
}

impl RemoteServiceMarker {
    pub fn is_present(&self) -> bool {
        matches!(self, RemoteServiceMarker::Present { .. })
    }

    pub fn binding_type(&self) -> &str {
        match self {
            RemoteServiceMarker::Present {
                binding_type: Some(value),
            } => value,
            _ => "unspecified",
        }
    }
}

/// Category-specific metadata carried by a [`TypeRecord`]
#[derive(Debug, Clone)]
pub enum TypeDetails {
    /// Service/manager/DAO interfaces carry no extra columns
    Interface,
    ActionClass {
        superclass: String,
    },
    ServiceImpl {
        implemented_interfaces: String,
        has_service_annotation: bool,
        remote_service: RemoteServiceMarker,
    },
    ManagerImpl {
        implemented_interfaces: String,
        has_service_annotation: bool,
        has_transactional_annotation: bool,
    },
    DaoImpl {
        implemented_interfaces: String,
        has_repository_annotation: bool,
    },
}

/// One uniquely-named declared type within a category
#[derive(Debug, Clone)]
pub struct TypeRecord {
    /// Declared name, original casing preserved for display
    pub name: String,

    /// Enclosing package, or [`NO_PACKAGE`]
    pub package: String,

    /// Owning file's path relative to the scan root
    pub relative_path: String,

    /// Category-specific metadata
    pub details: TypeDetails,
}

impl TypeRecord {
    /// Lowercased name, used solely for identity and sort order
    pub fn canonical_name(&self) -> String {
        self.name.to_lowercase()
    }
}

/// One (routing action x forward) pair, or one action with no forwards
#[derive(Debug, Clone)]
pub struct RouteEntry {
    /// Owning config file's path relative to the scan root
    pub relative_path: String,

    /// Form-bean type resolved via the action's logical name, or empty
    pub form_bean_type: String,

    pub action_path: String,
    pub action_type: String,
    pub action_name: String,

    /// Empty when the action has no forwards
    pub forward_name: String,
    pub forward_path: String,

    /// Normalized (action path, form-bean type, forward name) tuple
    pub duplicate_key: String,

    /// Entries across all config files sharing the duplicate key
    pub duplicate_count: usize,

    /// True iff `duplicate_count > 1`
    pub is_duplicate: bool,
}

/// Normalized duplicate key: each component independently replaced by
/// [`EMPTY_FIELD`] when blank after trimming.
pub fn duplicate_key(action_path: &str, form_bean_type: &str, forward_name: &str) -> String {
    [action_path, form_bean_type, forward_name]
        .iter()
        .map(|component| {
            let trimmed = component.trim();
            if trimmed.is_empty() {
                EMPTY_FIELD
            } else {
                trimmed
            }
        })
        .collect::<Vec<_>>()
        .join(KEY_SEPARATOR)
}

/// One unique (file, extracted path) pair from the frontend scan
#[derive(Debug, Clone)]
pub struct FrontendPathRecord {
    /// File's path relative to the scan root
    pub relative_path: String,

    /// Extracted path literal, original casing preserved
    pub path: String,

    /// Occurrences of the literal within the file
    pub count: usize,
}

pub fn yes_no(value: bool) -> &'static str {
    if value {
        "yes"
    } else {
        "no"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn duplicate_key_joins_trimmed_components() {
        let key = duplicate_key("/user/list", "com.x.UserForm", "success");
        assert_eq!(key, "/user/list_com.x.UserForm_success");
    }

    #[test]
    fn duplicate_key_substitutes_sentinel_for_blank_components() {
        let key = duplicate_key("/user/list", "  ", "");
        assert_eq!(key, format!("/user/list_{}_{}", EMPTY_FIELD, EMPTY_FIELD));
    }

    #[test]
    fn canonical_name_is_lowercased() {
        let record = TypeRecord {
            name: "OrderService".to_string(),
            package: NO_PACKAGE.to_string(),
            relative_path: "a/OrderService.java".to_string(),
            details: TypeDetails::Interface,
        };
        assert_eq!(record.canonical_name(), "orderservice");
    }

    #[test]
    fn absent_marker_never_reports_a_binding() {
        let marker = RemoteServiceMarker::Absent;
        assert!(!marker.is_present());
        assert_eq!(marker.binding_type(), "unspecified");

        let marker = RemoteServiceMarker::Present {
            binding_type: Some("direct".to_string()),
        };
        assert!(marker.is_present());
        assert_eq!(marker.binding_type(), "direct");
    }
}
