//! Pre-dispatch validation of compiled tasks against backend capabilities.

use crate::error::ParamError;
use crate::params::types::{FileParam, LoggingParam, Provider, TaskParams};

/// Check every task's file providers against a backend's whitelists.
///
/// The logging provider is checked first (skipped when no logging is
/// configured at all), then every input and output of every task. The first
/// violation aborts with [`ParamError::ProviderNotWhitelisted`] naming the
/// argument kind, the offending URI, and the backend; no partial result is
/// produced.
pub fn validate_submit(
    logging: &LoggingParam,
    tasks: &[TaskParams],
    backend: &str,
    input_providers: &[Provider],
    output_providers: &[Provider],
    logging_providers: &[Provider],
) -> Result<(), ParamError> {
    if let Some(provider) = logging.provider {
        if !logging_providers.contains(&provider) {
            return Err(ParamError::ProviderNotWhitelisted {
                kind: "logging",
                path: logging.uri.as_ref().map(|u| u.full()).unwrap_or_default(),
                backend: backend.to_string(),
            });
        }
    }

    for task in tasks {
        check_files(&task.inputs, input_providers, backend)?;
        check_files(&task.outputs, output_providers, backend)?;
    }

    Ok(())
}

fn check_files(
    params: &[FileParam],
    whitelist: &[Provider],
    backend: &str,
) -> Result<(), ParamError> {
    for param in params {
        if !whitelist.contains(&param.provider) {
            return Err(ParamError::ProviderNotWhitelisted {
                kind: param.role.arg_kind(),
                path: param.uri.full(),
                backend: backend.to_string(),
            });
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::params::factory::{build_logging_param, FileParamFactory};

    fn task_with(input_uri: &str, output_uri: &str) -> TaskParams {
        let inputs = FileParamFactory::inputs("input");
        let outputs = FileParamFactory::outputs("output");
        let mut task = TaskParams::numbered(1);
        task.inputs
            .push(inputs.make_param("IN", input_uri, false).unwrap());
        task.outputs
            .push(outputs.make_param("OUT", output_uri, false).unwrap());
        task
    }

    #[test]
    fn all_whitelisted_passes() {
        let logging = build_logging_param("gs://logs/job.log").unwrap();
        let tasks = vec![task_with("gs://b/in.txt", "gs://b/out.txt")];
        assert!(validate_submit(
            &logging,
            &tasks,
            "cloud-backend",
            &[Provider::CloudStorage],
            &[Provider::CloudStorage],
            &[Provider::CloudStorage],
        )
        .is_ok());
    }

    #[test]
    fn local_input_rejected_by_cloud_only_whitelist() {
        let logging = build_logging_param("gs://logs/job.log").unwrap();
        let tasks = vec![task_with("/tmp/in.txt", "gs://b/out.txt")];
        let err = validate_submit(
            &logging,
            &tasks,
            "cloud-backend",
            &[Provider::CloudStorage],
            &[Provider::CloudStorage],
            &[Provider::CloudStorage],
        )
        .unwrap_err();

        match err {
            ParamError::ProviderNotWhitelisted {
                kind,
                path,
                backend,
            } => {
                assert_eq!(kind, "input");
                assert_eq!(path, "/tmp/in.txt");
                assert_eq!(backend, "cloud-backend");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn logging_provider_is_checked_first() {
        let logging = build_logging_param("/tmp/logs/job.log").unwrap();
        let tasks = vec![task_with("/tmp/in.txt", "/tmp/out.txt")];
        let err = validate_submit(
            &logging,
            &tasks,
            "cloud-backend",
            &[Provider::Local],
            &[Provider::Local],
            &[Provider::CloudStorage],
        )
        .unwrap_err();
        assert!(matches!(
            err,
            ParamError::ProviderNotWhitelisted { kind: "logging", .. }
        ));
    }

    #[test]
    fn empty_logging_passes() {
        let tasks = vec![task_with("gs://b/in.txt", "gs://b/out.txt")];
        assert!(validate_submit(
            &LoggingParam::empty(),
            &tasks,
            "cloud-backend",
            &[Provider::CloudStorage],
            &[Provider::CloudStorage],
            &[Provider::CloudStorage],
        )
        .is_ok());
    }
}
