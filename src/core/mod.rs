mod engine;
mod frontend;
mod records;
mod registry;
mod report;
mod routes;
mod rules;
mod source_text;
mod walker;

pub use engine::Engine;
pub use frontend::FrontendScan;
pub use records::{
    duplicate_key, FrontendPathRecord, RemoteServiceMarker, RouteEntry, TypeDetails, TypeRecord,
};
pub use registry::CategoryRegistry;
pub use report::{write_workbook, ScanReport};
pub use routes::{annotate_duplicates, duplicate_groups, parse_routing_config};
pub use rules::{Category, ClassDecl, DeclShape, ImplDecl, RuleSet, IDENTITY_ORDER};
pub use source_text::{read_source, SourceText};
