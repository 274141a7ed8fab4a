//! The ordered extraction rule set and the text classifier built on it.
//!
//! Rules recognize declaration shapes in raw source text; nothing here
//! builds a syntax tree. Identity classification walks the rules in a
//! fixed priority order and the first match names the file, so a file
//! containing both a generic class declaration and, say, a `...ServiceImpl`
//! shape is identified by whichever rule comes first in [`IDENTITY_ORDER`].

use regex::Regex;

use super::records::{RemoteServiceMarker, NO_INTERFACES};
use crate::error::Result;

/// The seven architectural categories of the report
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Category {
    ActionClass,
    ServiceInterface,
    ServiceImpl,
    ManagerInterface,
    ManagerImpl,
    DaoInterface,
    DaoImpl,
}

impl Category {
    pub const ALL: [Category; 7] = [
        Category::ActionClass,
        Category::ServiceInterface,
        Category::ServiceImpl,
        Category::ManagerInterface,
        Category::ManagerImpl,
        Category::DaoInterface,
        Category::DaoImpl,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            Category::ActionClass => "action class",
            Category::ServiceInterface => "service interface",
            Category::ServiceImpl => "service impl",
            Category::ManagerInterface => "manager interface",
            Category::ManagerImpl => "manager impl",
            Category::DaoInterface => "DAO interface",
            Category::DaoImpl => "DAO impl",
        }
    }

    /// The declaration shape this category's pass scans with
    pub fn shape(&self) -> DeclShape {
        match self {
            Category::ActionClass => DeclShape::Class,
            Category::ServiceInterface => DeclShape::ServiceInterface,
            Category::ServiceImpl => DeclShape::ServiceImpl,
            Category::ManagerInterface => DeclShape::ManagerInterface,
            Category::ManagerImpl => DeclShape::ManagerImpl,
            Category::DaoInterface => DeclShape::DaoInterface,
            Category::DaoImpl => DeclShape::DaoImpl,
        }
    }
}

/// One recognized declaration shape
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeclShape {
    Class,
    ServiceInterface,
    ServiceImpl,
    ManagerInterface,
    ManagerImpl,
    DaoInterface,
    DaoImpl,
}

/// Priority order for identity classification, exposed as data so the
/// precedence policy is testable on its own.
pub const IDENTITY_ORDER: [DeclShape; 7] = [
    DeclShape::Class,
    DeclShape::ServiceInterface,
    DeclShape::ServiceImpl,
    DeclShape::ManagerInterface,
    DeclShape::ManagerImpl,
    DeclShape::DaoInterface,
    DeclShape::DaoImpl,
];

/// Captured fields of a generic class declaration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClassDecl {
    pub name: String,
    pub superclass: Option<String>,
}

/// Captured fields of an impl-class declaration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImplDecl {
    pub name: String,
    /// Raw implements clause, before generic stripping
    pub implements_clause: Option<String>,
}

/// Compiled extraction rules; construct once per run
pub struct RuleSet {
    class_def: Regex,
    service_interface: Regex,
    service_impl: Regex,
    manager_interface: Regex,
    manager_impl: Regex,
    dao_interface: Regex,
    dao_impl: Regex,
    package_decl: Regex,
    service_annotation: Regex,
    transactional_annotation: Regex,
    repository_annotation: Regex,
    remote_service_annotation: Regex,
    binding_type: Regex,
    generic_params: Regex,
}

impl RuleSet {
    pub fn new() -> Result<Self> {
        Ok(Self {
            class_def: Regex::new(r"(?i)public\s+class\s+(\w+)\s*(?:extends\s+(\w+))?")?,
            service_interface: Regex::new(r"(?i)public\s+interface\s+(\w+service)\s*\{?")?,
            service_impl: Regex::new(
                r"(?i)public\s+class\s+(\w+serviceimpl)\s*(?:implements\s+([^{]+))?",
            )?,
            manager_interface: Regex::new(r"(?i)public\s+interface\s+(\w+manager)\s*\{?")?,
            manager_impl: Regex::new(
                r"(?i)public\s+class\s+(\w+managerimpl)\s*(?:implements\s+([^{]+))?",
            )?,
            dao_interface: Regex::new(r"(?i)public\s+interface\s+(\w+dao)\s*\{?")?,
            dao_impl: Regex::new(r"(?i)public\s+class\s+(\w+daoimpl)\s*(?:implements\s+([^{]+))?")?,
            package_decl: Regex::new(r"(?i)package\s+([^;]+);")?,
            service_annotation: Regex::new(r"(?i)@service\s*(\(.*\))?")?,
            transactional_annotation: Regex::new(r"(?i)@transactional\s*(\(.*\))?")?,
            repository_annotation: Regex::new(r"(?i)@repository\s*(\(.*\))?")?,
            remote_service_annotation: Regex::new(r"(?i)@sofaservice\s*\(([^)]*)\)")?,
            binding_type: Regex::new(r#"(?i)bindingtype\s*=\s*["']([^"']+)["']"#)?,
            generic_params: Regex::new(r"<[^>]+>")?,
        })
    }

    fn rule(&self, shape: DeclShape) -> &Regex {
        match shape {
            DeclShape::Class => &self.class_def,
            DeclShape::ServiceInterface => &self.service_interface,
            DeclShape::ServiceImpl => &self.service_impl,
            DeclShape::ManagerInterface => &self.manager_interface,
            DeclShape::ManagerImpl => &self.manager_impl,
            DeclShape::DaoInterface => &self.dao_interface,
            DeclShape::DaoImpl => &self.dao_impl,
        }
    }

    /// First-match-wins classification across [`IDENTITY_ORDER`], returning
    /// the winning shape and the declared name (first occurrence in the file)
    pub fn classify_identity(&self, text: &str) -> Option<(DeclShape, String)> {
        for shape in IDENTITY_ORDER {
            if let Some(caps) = self.rule(shape).captures(text) {
                return Some((shape, caps[1].trim().to_string()));
            }
        }
        None
    }

    /// First generic class declaration in the file, if any
    pub fn class_declaration(&self, text: &str) -> Option<ClassDecl> {
        self.class_def.captures(text).map(|caps| ClassDecl {
            name: caps[1].trim().to_string(),
            superclass: caps
                .get(2)
                .map(|m| m.as_str().trim().to_string())
                .filter(|s| !s.is_empty()),
        })
    }

    /// Every interface declaration of the given shape in the file
    pub fn interface_names(&self, shape: DeclShape, text: &str) -> Vec<String> {
        self.rule(shape)
            .captures_iter(text)
            .map(|caps| caps[1].trim().to_string())
            .collect()
    }

    /// Every impl-class declaration of the given shape in the file
    pub fn impl_declarations(&self, shape: DeclShape, text: &str) -> Vec<ImplDecl> {
        self.rule(shape)
            .captures_iter(text)
            .map(|caps| ImplDecl {
                name: caps[1].trim().to_string(),
                implements_clause: caps.get(2).map(|m| m.as_str().to_string()),
            })
            .collect()
    }

    /// Package declaration, if any
    pub fn package_name(&self, text: &str) -> Option<String> {
        self.package_decl
            .captures(text)
            .map(|caps| caps[1].trim().to_string())
    }

    /// Turn a raw implements clause into the display list: strip generic
    /// parameters, split on commas, trim, drop empty segments. An empty
    /// result maps to the sentinel, never an empty string.
    pub fn implemented_interfaces(&self, clause: Option<&str>) -> String {
        let raw = match clause {
            Some(raw) if !raw.trim().is_empty() => raw,
            _ => return NO_INTERFACES.to_string(),
        };
        let cleaned = self.generic_params.replace_all(raw, "");
        let names: Vec<&str> = cleaned
            .split(',')
            .map(str::trim)
            .filter(|name| !name.is_empty())
            .collect();
        if names.is_empty() {
            NO_INTERFACES.to_string()
        } else {
            names.join(", ")
        }
    }

    pub fn has_service_annotation(&self, text: &str) -> bool {
        self.service_annotation.is_match(text)
    }

    pub fn has_transactional_annotation(&self, text: &str) -> bool {
        self.transactional_annotation.is_match(text)
    }

    pub fn has_repository_annotation(&self, text: &str) -> bool {
        self.repository_annotation.is_match(text)
    }

    /// Probe for the remoting marker. The binding type is extracted from
    /// the matched marker's argument text only, so presence and binding
    /// always agree.
    pub fn remote_service_marker(&self, text: &str) -> RemoteServiceMarker {
        match self.remote_service_annotation.captures(text) {
            None => RemoteServiceMarker::Absent,
            Some(caps) => {
                let args = caps.get(1).map(|m| m.as_str()).unwrap_or("");
                let binding_type = self
                    .binding_type
                    .captures(args)
                    .map(|caps| caps[1].trim().to_string());
                RemoteServiceMarker::Present { binding_type }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rules() -> RuleSet {
        RuleSet::new().unwrap()
    }

    #[test]
    fn every_category_has_a_distinct_label_and_scan_shape() {
        let labels: std::collections::HashSet<&str> =
            Category::ALL.iter().map(Category::label).collect();
        assert_eq!(labels.len(), Category::ALL.len());

        // only the action pass scans with the generic class rule
        for category in Category::ALL {
            assert_eq!(
                category.shape() == DeclShape::Class,
                category == Category::ActionClass
            );
        }
    }

    #[test]
    fn identity_prefers_the_generic_class_rule() {
        let text = "public class UserServiceImpl implements UserService {";
        let (shape, name) = rules().classify_identity(text).unwrap();
        assert_eq!(shape, DeclShape::Class);
        assert_eq!(name, "UserServiceImpl");
    }

    #[test]
    fn identity_falls_through_to_interface_rules() {
        let text = "public interface OrderDao {";
        let (shape, name) = rules().classify_identity(text).unwrap();
        assert_eq!(shape, DeclShape::DaoInterface);
        assert_eq!(name, "OrderDao");
    }

    #[test]
    fn class_declaration_captures_superclass() {
        let decl = rules()
            .class_declaration("public class ListAction extends BaseAction {")
            .unwrap();
        assert_eq!(decl.name, "ListAction");
        assert_eq!(decl.superclass.as_deref(), Some("BaseAction"));
    }

    #[test]
    fn class_declaration_without_extends() {
        let decl = rules()
            .class_declaration("public class ListAction {")
            .unwrap();
        assert_eq!(decl.superclass, None);
    }

    #[test]
    fn interface_rule_is_case_insensitive_and_finds_all_matches() {
        let text = "public interface OrderService {}\npublic interface billingSERVICE {}";
        let names = rules().interface_names(DeclShape::ServiceInterface, text);
        assert_eq!(names, vec!["OrderService", "billingSERVICE"]);
    }

    #[test]
    fn impl_declaration_captures_raw_implements_clause() {
        let decls = rules().impl_declarations(
            DeclShape::ServiceImpl,
            "public class OrderServiceImpl implements OrderService, Auditable {",
        );
        assert_eq!(decls.len(), 1);
        assert_eq!(decls[0].name, "OrderServiceImpl");
        assert_eq!(
            decls[0].implements_clause.as_deref(),
            Some("OrderService, Auditable ")
        );
    }

    #[test]
    fn implemented_interfaces_strips_generics_and_splits() {
        let display = rules().implemented_interfaces(Some("FooService<Bar>, BazService"));
        assert_eq!(display, "FooService, BazService");
    }

    #[test]
    fn implemented_interfaces_empty_clause_maps_to_sentinel() {
        assert_eq!(rules().implemented_interfaces(None), NO_INTERFACES);
        assert_eq!(rules().implemented_interfaces(Some("  ")), NO_INTERFACES);
        assert_eq!(
            rules().implemented_interfaces(Some("<Generic>")),
            NO_INTERFACES
        );
    }

    #[test]
    fn package_extraction_trims_the_declaration() {
        let package = rules().package_name("package  com.example.orders ;").unwrap();
        assert_eq!(package, "com.example.orders");
    }

    #[test]
    fn remote_marker_with_binding_type() {
        let marker = rules()
            .remote_service_marker("@SofaService(interfaceType = X.class, bindingType = \"direct\")");
        assert_eq!(
            marker,
            RemoteServiceMarker::Present {
                binding_type: Some("direct".to_string())
            }
        );
    }

    #[test]
    fn remote_marker_without_binding_type() {
        let marker = rules().remote_service_marker("@SofaService(uniqueId = \"a\")");
        assert!(marker.is_present());
        assert_eq!(marker.binding_type(), "unspecified");
    }

    #[test]
    fn absent_remote_marker() {
        let marker = rules().remote_service_marker("@Service\npublic class A {}");
        assert!(!marker.is_present());
        assert_eq!(marker.binding_type(), "unspecified");
    }

    #[test]
    fn binding_type_outside_the_marker_is_ignored() {
        // bindingType appears in the file but not inside a marker argument
        let marker = rules().remote_service_marker("String bindingType = \"tr\";");
        assert!(!marker.is_present());
    }

    #[test]
    fn plain_service_annotation_does_not_trip_the_remote_probe() {
        assert!(rules().has_service_annotation("@Service\npublic class A {}"));
        assert!(!rules()
            .remote_service_marker("@Service\npublic class A {}")
            .is_present());
    }
}
