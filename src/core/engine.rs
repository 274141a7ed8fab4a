//! Phase orchestration. One run is nine strictly sequential phases, each
//! walking the tree and re-reading files from disk: the identity pre-scan,
//! the routing scan, the frontend scan, then one scan per type category.
//! Any error aborts the whole run; there is no per-file isolation and no
//! partial report.

use std::collections::HashMap;
use std::path::Path;

use tracing::{debug, info, warn};

use super::frontend::FrontendScan;
use super::records::{
    FrontendPathRecord, RouteEntry, TypeDetails, TypeRecord, NO_PACKAGE, NO_SUPERCLASS,
    UNRESOLVED_NAME,
};
use super::registry::CategoryRegistry;
use super::report::{write_workbook, ScanReport};
use super::routes::{annotate_duplicates, duplicate_groups, parse_routing_config};
use super::rules::{Category, RuleSet};
use super::source_text::read_source;
use super::walker;
use crate::config::Config;
use crate::error::Result;

/// Main orchestration engine for one census run
pub struct Engine {
    config: Config,
    rules: RuleSet,
}

impl Engine {
    pub fn new(config: Config) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            config,
            rules: RuleSet::new()?,
        })
    }

    /// Run every scan phase and assemble the report, without writing it out
    pub fn run(&self) -> Result<ScanReport> {
        info!("Pre-scanning type identities");
        let identity_index = self.build_identity_index()?;
        info!("Indexed {} distinct type names", identity_index.len());

        info!("Scanning routing configuration");
        let routes = self.scan_routes()?;
        info!("Collected {} routing entries", routes.len());

        info!("Scanning frontend files for path references");
        let frontend_refs = self.scan_frontend()?;
        info!("Collected {} frontend path records", frontend_refs.len());

        info!("Scanning action classes");
        let actions = self.scan_actions()?;

        info!("Scanning service interfaces");
        let service_interfaces = self.scan_interfaces(Category::ServiceInterface)?;

        info!("Scanning service impl classes");
        let service_impls =
            self.scan_impls(Category::ServiceImpl, |rules, text, clause| {
                TypeDetails::ServiceImpl {
                    implemented_interfaces: rules.implemented_interfaces(clause),
                    has_service_annotation: rules.has_service_annotation(text),
                    remote_service: rules.remote_service_marker(text),
                }
            })?;

        info!("Scanning manager interfaces");
        let manager_interfaces = self.scan_interfaces(Category::ManagerInterface)?;

        info!("Scanning manager impl classes");
        let manager_impls =
            self.scan_impls(Category::ManagerImpl, |rules, text, clause| {
                TypeDetails::ManagerImpl {
                    implemented_interfaces: rules.implemented_interfaces(clause),
                    has_service_annotation: rules.has_service_annotation(text),
                    has_transactional_annotation: rules.has_transactional_annotation(text),
                }
            })?;

        info!("Scanning DAO interfaces");
        let dao_interfaces = self.scan_interfaces(Category::DaoInterface)?;

        info!("Scanning DAO impl classes");
        let dao_impls = self.scan_impls(Category::DaoImpl, |rules, text, clause| {
            TypeDetails::DaoImpl {
                implemented_interfaces: rules.implemented_interfaces(clause),
                has_repository_annotation: rules.has_repository_annotation(text),
            }
        })?;

        Ok(ScanReport {
            routes,
            frontend_refs,
            actions: actions.into_sorted(),
            service_interfaces: service_interfaces.into_sorted(),
            service_impls: service_impls.into_sorted(),
            manager_interfaces: manager_interfaces.into_sorted(),
            manager_impls: manager_impls.into_sorted(),
            dao_interfaces: dao_interfaces.into_sorted(),
            dao_impls: dao_impls.into_sorted(),
        })
    }

    /// Run the scan and persist the workbook
    pub fn execute(&self) -> Result<()> {
        let report = self.run()?;
        write_workbook(&report, &self.config.report.output_path)?;

        info!("Scan complete:");
        info!("  - {} routing entries", report.routes.len());
        info!("  - {} frontend path records", report.frontend_refs.len());
        info!("  - {} action classes", report.actions.len());
        info!("  - {} service interfaces", report.service_interfaces.len());
        info!("  - {} service impls", report.service_impls.len());
        info!("  - {} manager interfaces", report.manager_interfaces.len());
        info!("  - {} manager impls", report.manager_impls.len());
        info!("  - {} DAO interfaces", report.dao_interfaces.len());
        info!("  - {} DAO impls", report.dao_impls.len());
        info!(
            "Report written to {}",
            self.config.report.output_path.display()
        );
        Ok(())
    }

    fn root(&self) -> &Path {
        &self.config.scan.base_dir
    }

    /// Identity pre-scan: extracted type name -> owning file relative path.
    /// First match per file, first file per name.
    pub fn build_identity_index(&self) -> Result<HashMap<String, String>> {
        let mut index = HashMap::new();
        for path in walker::source_files(self.root())? {
            if !walker::is_java_file(&path) {
                continue;
            }
            let source = read_source(&path)?;
            if let Some((_, name)) = self.rules.classify_identity(&source.text) {
                let relative = walker::relative_path(self.root(), &path);
                index.entry(name).or_insert(relative);
            }
        }
        Ok(index)
    }

    fn scan_routes(&self) -> Result<Vec<RouteEntry>> {
        let marker = self.config.scan.routing_file_marker.to_lowercase();
        let mut entries = Vec::new();
        for path in walker::source_files(self.root())? {
            if !walker::is_routing_config(&path, &marker) {
                continue;
            }
            debug!("Parsing routing config {}", path.display());
            let relative = walker::relative_path(self.root(), &path);
            let source = read_source(&path)?;
            entries.extend(parse_routing_config(&source.text, &relative)?);
        }

        annotate_duplicates(&mut entries);
        let groups = duplicate_groups(&entries);
        if groups.is_empty() {
            info!("No duplicate routing entries");
        } else {
            warn!("{} duplicate routing groups:", groups.len());
            for (key, count) in groups {
                warn!("  {} ({} entries)", key, count);
            }
        }
        Ok(entries)
    }

    fn scan_frontend(&self) -> Result<Vec<FrontendPathRecord>> {
        let suffixes = &self.config.scan.frontend_suffixes;
        let mut scan = FrontendScan::new()?;
        for path in walker::source_files(self.root())? {
            if !walker::is_frontend_file(&path, suffixes) {
                continue;
            }
            debug!("Extracting path references from {}", path.display());
            let relative = walker::relative_path(self.root(), &path);
            let source = read_source(&path)?;
            scan.scan_file(&relative, &source.text);
        }
        Ok(scan.finish())
    }

    /// Action pass: only `*Action.java` files, identified by the first
    /// identity match; files with no extractable name still produce a
    /// record under the unresolved-name sentinel.
    fn scan_actions(&self) -> Result<CategoryRegistry> {
        let mut registry = CategoryRegistry::new(Category::ActionClass);
        for path in walker::source_files(self.root())? {
            if !walker::is_action_file(&path) {
                continue;
            }
            debug!("Scanning action file {}", path.display());
            let source = read_source(&path)?;
            let name = self
                .rules
                .classify_identity(&source.text)
                .map(|(_, name)| name)
                .unwrap_or_else(|| UNRESOLVED_NAME.to_string());
            let superclass = self
                .rules
                .class_declaration(&source.text)
                .and_then(|decl| decl.superclass)
                .unwrap_or_else(|| NO_SUPERCLASS.to_string());
            let record = TypeRecord {
                name,
                package: self.package_of(&source.text),
                relative_path: walker::relative_path(self.root(), &path),
                details: TypeDetails::ActionClass { superclass },
            };
            if registry.register(record) {
                debug!("Registered action class");
            }
        }
        info!("Found {} {}es", registry.len(), registry.category().label());
        Ok(registry)
    }

    /// Interface pass: every match of the category's rule in every Java
    /// file, deduplicated by canonical name
    fn scan_interfaces(&self, category: Category) -> Result<CategoryRegistry> {
        let mut registry = CategoryRegistry::new(category);
        for path in walker::source_files(self.root())? {
            if !walker::is_java_file(&path) {
                continue;
            }
            let source = read_source(&path)?;
            let names = self.rules.interface_names(category.shape(), &source.text);
            if names.is_empty() {
                continue;
            }
            let relative = walker::relative_path(self.root(), &path);
            let package = self.package_of(&source.text);
            for name in names {
                let inserted = registry.register(TypeRecord {
                    name: name.clone(),
                    package: package.clone(),
                    relative_path: relative.clone(),
                    details: TypeDetails::Interface,
                });
                if inserted {
                    debug!("Found {} {} in {}", category.label(), name, relative);
                }
            }
        }
        info!("Found {} {}s", registry.len(), category.label());
        Ok(registry)
    }

    /// Impl pass: like the interface pass, with category-specific metadata
    /// built from the implements clause and the whole-file marker probes
    fn scan_impls<F>(&self, category: Category, build_details: F) -> Result<CategoryRegistry>
    where
        F: Fn(&RuleSet, &str, Option<&str>) -> TypeDetails,
    {
        let mut registry = CategoryRegistry::new(category);
        for path in walker::source_files(self.root())? {
            if !walker::is_java_file(&path) {
                continue;
            }
            let source = read_source(&path)?;
            let decls = self.rules.impl_declarations(category.shape(), &source.text);
            if decls.is_empty() {
                continue;
            }
            let relative = walker::relative_path(self.root(), &path);
            let package = self.package_of(&source.text);
            for decl in decls {
                let details = build_details(
                    &self.rules,
                    &source.text,
                    decl.implements_clause.as_deref(),
                );
                let inserted = registry.register(TypeRecord {
                    name: decl.name.clone(),
                    package: package.clone(),
                    relative_path: relative.clone(),
                    details,
                });
                if inserted {
                    debug!("Found {} {} in {}", category.label(), decl.name, relative);
                }
            }
        }
        info!("Found {} {}s", registry.len(), category.label());
        Ok(registry)
    }

    fn package_of(&self, text: &str) -> String {
        self.rules
            .package_name(text)
            .unwrap_or_else(|| NO_PACKAGE.to_string())
    }
}
