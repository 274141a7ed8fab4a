//! Report assembly: pure data shaping of scan results into ordered rows,
//! handed to the spreadsheet writer. Category lists arrive already sorted
//! by canonical name; route entries and frontend records keep the order
//! the scans produced.

use std::path::Path;

use rust_xlsxwriter::Workbook;

use super::records::{yes_no, FrontendPathRecord, RouteEntry, TypeDetails, TypeRecord};
use crate::error::Result;

/// Everything one run produces, in sheet order
pub struct ScanReport {
    pub routes: Vec<RouteEntry>,
    pub frontend_refs: Vec<FrontendPathRecord>,
    pub actions: Vec<TypeRecord>,
    pub service_interfaces: Vec<TypeRecord>,
    pub service_impls: Vec<TypeRecord>,
    pub manager_interfaces: Vec<TypeRecord>,
    pub manager_impls: Vec<TypeRecord>,
    pub dao_interfaces: Vec<TypeRecord>,
    pub dao_impls: Vec<TypeRecord>,
}

const ROUTE_HEADERS: [&str; 9] = [
    "Config File",
    "Form Bean Type",
    "Action Path",
    "Action Type",
    "Action Name",
    "Forward Name",
    "Forward Path",
    "Duplicate",
    "Duplicate Count",
];

const FRONTEND_HEADERS: [&str; 3] = ["File", "Path", "Occurrences"];

const ACTION_HEADERS: [&str; 4] = ["Class", "Package", "File", "Superclass"];

const INTERFACE_HEADERS: [&str; 3] = ["Interface", "Package", "File"];

const SERVICE_IMPL_HEADERS: [&str; 7] = [
    "Class",
    "Package",
    "File",
    "Implemented Interfaces",
    "@Service",
    "@SofaService",
    "Binding Type",
];

const MANAGER_IMPL_HEADERS: [&str; 6] = [
    "Class",
    "Package",
    "File",
    "Implemented Interfaces",
    "@Service",
    "@Transactional",
];

const DAO_IMPL_HEADERS: [&str; 5] = [
    "Class",
    "Package",
    "File",
    "Implemented Interfaces",
    "@Repository",
];

/// Persist the nine-sheet workbook to the configured output path
pub fn write_workbook(report: &ScanReport, path: &Path) -> Result<()> {
    let mut workbook = Workbook::new();

    write_sheet(
        &mut workbook,
        "Routing Config",
        &ROUTE_HEADERS,
        report.routes.iter().map(route_row),
    )?;
    write_sheet(
        &mut workbook,
        "Frontend Paths",
        &FRONTEND_HEADERS,
        report.frontend_refs.iter().map(frontend_row),
    )?;
    write_sheet(
        &mut workbook,
        "Action Classes",
        &ACTION_HEADERS,
        report.actions.iter().map(type_row),
    )?;
    write_sheet(
        &mut workbook,
        "Service Interfaces",
        &INTERFACE_HEADERS,
        report.service_interfaces.iter().map(type_row),
    )?;
    write_sheet(
        &mut workbook,
        "Service Impls",
        &SERVICE_IMPL_HEADERS,
        report.service_impls.iter().map(type_row),
    )?;
    write_sheet(
        &mut workbook,
        "Manager Interfaces",
        &INTERFACE_HEADERS,
        report.manager_interfaces.iter().map(type_row),
    )?;
    write_sheet(
        &mut workbook,
        "Manager Impls",
        &MANAGER_IMPL_HEADERS,
        report.manager_impls.iter().map(type_row),
    )?;
    write_sheet(
        &mut workbook,
        "DAO Interfaces",
        &INTERFACE_HEADERS,
        report.dao_interfaces.iter().map(type_row),
    )?;
    write_sheet(
        &mut workbook,
        "DAO Impls",
        &DAO_IMPL_HEADERS,
        report.dao_impls.iter().map(type_row),
    )?;

    workbook.save(path)?;
    Ok(())
}

fn write_sheet<I>(
    workbook: &mut Workbook,
    name: &str,
    headers: &[&str],
    rows: I,
) -> Result<()>
where
    I: Iterator<Item = Vec<String>>,
{
    let worksheet = workbook.add_worksheet();
    worksheet.set_name(name)?;

    for (col, header) in headers.iter().enumerate() {
        worksheet.write_string(0, col as u16, *header)?;
    }
    for (row, cells) in rows.enumerate() {
        for (col, cell) in cells.iter().enumerate() {
            worksheet.write_string(row as u32 + 1, col as u16, cell)?;
        }
    }
    worksheet.autofit();
    Ok(())
}

fn route_row(entry: &RouteEntry) -> Vec<String> {
    vec![
        entry.relative_path.clone(),
        entry.form_bean_type.clone(),
        entry.action_path.clone(),
        entry.action_type.clone(),
        entry.action_name.clone(),
        entry.forward_name.clone(),
        entry.forward_path.clone(),
        yes_no(entry.is_duplicate).to_string(),
        entry.duplicate_count.to_string(),
    ]
}

fn frontend_row(record: &FrontendPathRecord) -> Vec<String> {
    vec![
        record.relative_path.clone(),
        record.path.clone(),
        record.count.to_string(),
    ]
}

fn type_row(record: &TypeRecord) -> Vec<String> {
    let mut row = vec![
        record.name.clone(),
        record.package.clone(),
        record.relative_path.clone(),
    ];
    match &record.details {
        TypeDetails::Interface => {}
        TypeDetails::ActionClass { superclass } => {
            row.push(superclass.clone());
        }
        TypeDetails::ServiceImpl {
            implemented_interfaces,
            has_service_annotation,
            remote_service,
        } => {
            row.push(implemented_interfaces.clone());
            row.push(yes_no(*has_service_annotation).to_string());
            row.push(yes_no(remote_service.is_present()).to_string());
            row.push(remote_service.binding_type().to_string());
        }
        TypeDetails::ManagerImpl {
            implemented_interfaces,
            has_service_annotation,
            has_transactional_annotation,
        } => {
            row.push(implemented_interfaces.clone());
            row.push(yes_no(*has_service_annotation).to_string());
            row.push(yes_no(*has_transactional_annotation).to_string());
        }
        TypeDetails::DaoImpl {
            implemented_interfaces,
            has_repository_annotation,
        } => {
            row.push(implemented_interfaces.clone());
            row.push(yes_no(*has_repository_annotation).to_string());
        }
    }
    row
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::records::RemoteServiceMarker;

    #[test]
    fn service_impl_rows_match_the_sheet_columns() {
        let record = TypeRecord {
            name: "OrderServiceImpl".to_string(),
            package: "com.x".to_string(),
            relative_path: "com/x/OrderServiceImpl.java".to_string(),
            details: TypeDetails::ServiceImpl {
                implemented_interfaces: "OrderService".to_string(),
                has_service_annotation: true,
                remote_service: RemoteServiceMarker::Present {
                    binding_type: Some("direct".to_string()),
                },
            },
        };
        let row = type_row(&record);
        assert_eq!(row.len(), SERVICE_IMPL_HEADERS.len());
        assert_eq!(row[4], "yes");
        assert_eq!(row[5], "yes");
        assert_eq!(row[6], "direct");
    }

    #[test]
    fn workbook_is_written_with_all_nine_sheets() {
        let report = ScanReport {
            routes: vec![],
            frontend_refs: vec![],
            actions: vec![],
            service_interfaces: vec![],
            service_impls: vec![],
            manager_interfaces: vec![],
            manager_impls: vec![],
            dao_interfaces: vec![],
            dao_impls: vec![],
        };
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("report.xlsx");
        write_workbook(&report, &path).unwrap();
        assert!(path.is_file());
    }
}
