use crate::error::ExportError;
use crate::table::TableRow;
use std::fs::File;
use std::path::Path;

pub fn export_csv<P: AsRef<Path>>(rows: &[TableRow], path: P) -> Result<(), ExportError> {
    let path_ref = path.as_ref();
    let file = File::create(path_ref).map_err(|source| ExportError::FileCreate {
        path: path_ref.to_path_buf(),
        source,
    })?;

    let mut writer = csv::Writer::from_writer(file);

    writer.write_record([
        "Project",
        "Name",
        "Type",
        "Designation",
        "Status",
        "Area",
        "Price",
        "Rent",
    ])?;

    for row in rows {
        writer.write_record([
            row.owner_project_name.as_str(),
            row.name.as_str(),
            row.unit_type.as_str(),
            row.designation.as_deref().unwrap_or("-"),
            row.status_label
                .as_deref()
                .or(row.status_id.as_deref())
                .unwrap_or("-"),
            row.area.as_deref().unwrap_or("-"),
            row.price.as_deref().unwrap_or("-"),
            row.rent.as_deref().unwrap_or("-"),
        ])?;
    }

    writer.flush().map_err(|e| ExportError::WriteError {
        message: e.to_string(),
    })?;

    Ok(())
}
