//! Flag-style argument compiler for single-job submissions.
//!
//! Tokens arrive as repeated list-valued flags already collected by the
//! caller's CLI layer. Each token is `key` or `key=value`, split on the
//! first separator only.

use crate::error::ParamError;
use crate::params::factory::FileParamFactory;
use crate::params::types::{EnvParam, LabelParam, TaskParams};

/// `key` or `key=value`; env and label tokens may omit the value.
fn split_key_value(arg: &str) -> (&str, Option<&str>) {
    match arg.split_once('=') {
        Some((key, value)) => (key, Some(value)),
        None => (arg, None),
    }
}

/// `uri` or `name=uri`; file tokens may omit the name but never the value.
fn split_name_uri(arg: &str) -> (Option<&str>, &str) {
    match arg.split_once('=') {
        Some((name, uri)) => (Some(name), uri),
        None => (None, arg),
    }
}

/// Compile flag token lists into a single task's parameter set.
///
/// Env and label tokens are simple pairs. File tokens carry an optional name
/// half; unnamed ones get an auto-generated variable name from the role's
/// factory. Recursiveness comes from which list the token arrived in.
pub fn compile_args(
    envs: &[String],
    labels: &[String],
    inputs: &[String],
    inputs_recursive: &[String],
    outputs: &[String],
    outputs_recursive: &[String],
    input_factory: &mut FileParamFactory,
    output_factory: &mut FileParamFactory,
) -> Result<TaskParams, ParamError> {
    let mut task = TaskParams::default();

    for arg in envs {
        let (name, value) = split_key_value(arg);
        task.envs
            .push(EnvParam::new(name, value.map(str::to_string))?);
    }

    for arg in labels {
        let (name, value) = split_key_value(arg);
        task.labels
            .push(LabelParam::new(name, value.map(str::to_string))?);
    }

    for (recursive, args) in [(false, inputs), (true, inputs_recursive)] {
        for arg in args {
            let (name, uri) = split_name_uri(arg);
            let name = input_factory.next_auto_name(name.unwrap_or(""));
            task.inputs
                .push(input_factory.make_param(&name, uri, recursive)?);
        }
    }

    for (recursive, args) in [(false, outputs), (true, outputs_recursive)] {
        for arg in args {
            let (name, uri) = split_name_uri(arg);
            let name = output_factory.next_auto_name(name.unwrap_or(""));
            task.outputs
                .push(output_factory.make_param(&name, uri, recursive)?);
        }
    }

    Ok(task)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::params::types::Provider;

    fn strings(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    fn compile(
        envs: &[&str],
        labels: &[&str],
        inputs: &[&str],
        inputs_recursive: &[&str],
        outputs: &[&str],
        outputs_recursive: &[&str],
    ) -> Result<TaskParams, ParamError> {
        let mut input_factory = FileParamFactory::inputs("input");
        let mut output_factory = FileParamFactory::outputs("output");
        compile_args(
            &strings(envs),
            &strings(labels),
            &strings(inputs),
            &strings(inputs_recursive),
            &strings(outputs),
            &strings(outputs_recursive),
            &mut input_factory,
            &mut output_factory,
        )
    }

    #[test]
    fn env_tokens_split_on_first_separator_only() {
        let task = compile(&["A=x=y", "FLAG"], &[], &[], &[], &[], &[]).unwrap();
        assert_eq!(task.task_id, None);
        assert_eq!(task.envs[0].name, "A");
        assert_eq!(task.envs[0].value.as_deref(), Some("x=y"));
        assert_eq!(task.envs[1].name, "FLAG");
        assert_eq!(task.envs[1].value, None);
    }

    #[test]
    fn label_tokens_compile_and_validate() {
        let task = compile(&[], &["batch=run-1", "canary"], &[], &[], &[], &[]).unwrap();
        assert_eq!(task.labels[0].name, "batch");
        assert_eq!(task.labels[0].value.as_deref(), Some("run-1"));
        assert_eq!(task.labels[1].value, None);

        assert!(compile(&[], &["job-id=nope"], &[], &[], &[], &[]).is_err());
    }

    #[test]
    fn bare_file_tokens_are_auto_named() {
        let task = compile(
            &[],
            &[],
            &["gs://b/in1.txt", "GENOME=gs://b/in2.txt", "gs://b/in3.txt"],
            &[],
            &["gs://b/out.txt"],
            &[],
        )
        .unwrap();

        let names: Vec<_> = task.inputs.iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names, vec!["INPUT_0", "GENOME", "INPUT_1"]);
        assert_eq!(task.outputs[0].name, "OUTPUT_0");
        assert_eq!(task.outputs[0].provider, Provider::CloudStorage);
    }

    #[test]
    fn recursive_lists_set_the_recursive_flag() {
        let task = compile(
            &[],
            &[],
            &[],
            &["DATA=gs://b/data"],
            &[],
            &["RESULTS=gs://b/results"],
        )
        .unwrap();

        assert!(task.inputs[0].recursive);
        assert_eq!(task.inputs[0].uri.full(), "gs://b/data/");
        assert!(task.outputs[0].recursive);
        assert_eq!(task.outputs[0].container_path, "output/gs/b/results/");
    }
}
