//! Batch-definition file compiler.
//!
//! The batch file is tab-delimited text. The first row is a header of column
//! descriptors, each subsequent row is one task whose cells map positionally
//! onto the header. Reading is streaming, record by record; this is the only
//! I/O in the whole compilation layer.

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::iter;
use std::path::Path;

use crate::error::ParamError;
use crate::params::factory::FileParamFactory;
use crate::params::types::{EnvParam, LabelParam, TaskParams};
use crate::params::validate::{validate_label, validate_name};

/// One header column, resolved to the parameter it produces per row.
#[derive(Debug, Clone)]
enum Column {
    Env(String),
    Label(String),
    Input { name: String, recursive: bool },
    Output { name: String, recursive: bool },
}

/// Parse a header row into column descriptors.
///
/// Columns look like their command-line flag equivalents: `--env NAME`,
/// `--label NAME`, `--input [NAME]`, `--input-recursive [NAME]`, and the
/// output pair. For historical reasons a bareword column (`JOB_ID`) is sugar
/// for `--env JOB_ID`. File columns without a name are auto-named by the
/// role's factory.
fn parse_header(
    header: &str,
    input_factory: &mut FileParamFactory,
    output_factory: &mut FileParamFactory,
) -> Result<Vec<Column>, ParamError> {
    let mut columns = Vec::new();

    for col in header.split('\t') {
        // The "-"/"--" namespace is reserved for typed columns.
        let (col_type, col_value) = if col.starts_with('-') {
            col.split_once(' ').unwrap_or((col, ""))
        } else {
            ("--env", col)
        };

        match col_type {
            "--env" => {
                validate_name(col_value, "environment variable")?;
                columns.push(Column::Env(col_value.to_string()));
            }
            "--label" => {
                validate_label(col_value, None, false)?;
                columns.push(Column::Label(col_value.to_string()));
            }
            "--input" | "--input-recursive" => {
                let name = input_factory.next_auto_name(col_value);
                validate_name(&name, "input parameter")?;
                columns.push(Column::Input {
                    name,
                    recursive: col_type.ends_with("recursive"),
                });
            }
            "--output" | "--output-recursive" => {
                let name = output_factory.next_auto_name(col_value);
                validate_name(&name, "output parameter")?;
                columns.push(Column::Output {
                    name,
                    recursive: col_type.ends_with("recursive"),
                });
            }
            _ => return Err(ParamError::UnrecognizedColumn(col.to_string())),
        }
    }

    Ok(columns)
}

/// Compile a batch file into per-task parameter sets.
pub fn compile_tasks_file(
    path: &Path,
    task_min: Option<u32>,
    task_max: Option<u32>,
    input_factory: &mut FileParamFactory,
    output_factory: &mut FileParamFactory,
) -> Result<Vec<TaskParams>, ParamError> {
    let reader = BufReader::new(File::open(path)?);
    compile_tasks(
        reader,
        &path.display().to_string(),
        task_min,
        task_max,
        input_factory,
        output_factory,
    )
}

/// Compile batch records from any buffered reader.
///
/// Tasks are numbered from 1 at the first data row. The optional inclusive
/// `[task_min, task_max]` range selects which rows are materialized; rows
/// outside it are skipped entirely, validation included. A row whose width
/// differs from the header is tolerated with a warning: extra cells are
/// ignored and missing trailing cells compile as empty values (an empty file
/// URI still fails the path policy, so nothing half-built gets through).
pub fn compile_tasks<R: BufRead>(
    reader: R,
    source: &str,
    task_min: Option<u32>,
    task_max: Option<u32>,
    input_factory: &mut FileParamFactory,
    output_factory: &mut FileParamFactory,
) -> Result<Vec<TaskParams>, ParamError> {
    let mut lines = reader.lines();
    let header = match lines.next() {
        Some(line) => line?,
        None => return Err(ParamError::NoTasks(source.to_string())),
    };
    let columns = parse_header(&header, input_factory, output_factory)?;

    let mut tasks = Vec::new();
    for (index, line) in lines.enumerate() {
        let line = line?;
        let task_id = index as u32 + 1;
        if task_min.is_some_and(|min| task_id < min) || task_max.is_some_and(|max| task_id > max)
        {
            continue;
        }

        let cells: Vec<&str> = line.split('\t').collect();
        if cells.len() != columns.len() {
            tracing::warn!(
                row = task_id + 1,
                expected = columns.len(),
                found = cells.len(),
                source,
                "unexpected number of fields in tasks file row"
            );
        }

        let mut task = TaskParams::numbered(task_id);
        let padded = cells.iter().copied().chain(iter::repeat(""));
        for (column, cell) in columns.iter().zip(padded) {
            match column {
                Column::Env(name) => {
                    task.envs
                        .push(EnvParam::new(name.clone(), Some(cell.to_string()))?);
                }
                Column::Label(name) => {
                    task.labels
                        .push(LabelParam::new(name.clone(), Some(cell.to_string()))?);
                }
                Column::Input { name, recursive } => {
                    task.inputs
                        .push(input_factory.make_param(name, cell, *recursive)?);
                }
                Column::Output { name, recursive } => {
                    task.outputs
                        .push(output_factory.make_param(name, cell, *recursive)?);
                }
            }
        }
        tasks.push(task);
    }

    if tasks.is_empty() {
        return Err(ParamError::NoTasks(source.to_string()));
    }

    tracing::debug!(tasks = tasks.len(), source, "compiled batch tasks");
    Ok(tasks)
}
