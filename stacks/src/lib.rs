//! The example stacks. Each one declares a single greeting function; the
//! ones with a log group also pin the function name so the group can be
//! named after it.

use cdkstarter::resources::{
    log_group_name_for, BundlingOptions, LogGroup, LogGroupProps, NodejsFunction, NodejsFunctionProps,
    OutputFormat, RemovalPolicy, RetentionDays, Runtime,
};
use cdkstarter::{App, CfnOutput, Result, Stack, StackProps};

pub mod reference_project;

/// relative to the entry point binaries, like the generated typescript projects.
pub const FUNCTION_ENTRY: &str = "../functions/index.ts";
pub const FUNCTION_ID: &str = "MyFunction";
pub const LOG_GROUP_ID: &str = "MyLogGroup";
pub const OUTPUT_ID: &str = "FunctionArn";

pub fn esm_bundling() -> BundlingOptions {
    BundlingOptions {
        minify: true,
        main_fields: vec!["module".into(), "main".into()],
        source_map: true,
        format: OutputFormat::Esm,
        banner: None,
    }
}

/// function only, no explicit log group.
pub fn function_stack<'a>(scope: &'a mut App, id: &str, props: StackProps, runtime: Runtime) -> Result<&'a mut Stack> {
    let stack = scope.add_stack(id, props)?;

    let function = NodejsFunction::new(stack, FUNCTION_ID, NodejsFunctionProps {
        runtime,
        entry: FUNCTION_ENTRY.into(),
        handler: "handler".into(),
        bundling: esm_bundling(),
        ..Default::default()
    })?;

    stack.add_output(OUTPUT_ID, CfnOutput::new(function.function_arn()))?;
    Ok(stack)
}

/// function with a named log group that keeps logs for one day and is
/// deleted together with the stack.
pub fn function_stack_with_logs<'a>(
    scope: &'a mut App,
    id: &str,
    props: StackProps,
    runtime: Runtime,
    function_name: &str,
) -> Result<&'a mut Stack> {
    let stack = scope.add_stack(id, props)?;

    let log_group = LogGroup::new(stack, LOG_GROUP_ID, LogGroupProps {
        log_group_name: Some(log_group_name_for(function_name)),
        retention: RetentionDays::OneDay,
        removal_policy: RemovalPolicy::Destroy,
    })?;

    let function = NodejsFunction::new(stack, FUNCTION_ID, NodejsFunctionProps {
        runtime,
        entry: FUNCTION_ENTRY.into(),
        handler: "handler".into(),
        function_name: Some(function_name.to_string()),
        log_group: Some(log_group),
        bundling: esm_bundling(),
        ..Default::default()
    })?;

    stack.add_output(OUTPUT_ID, CfnOutput::new(function.function_arn()))?;
    Ok(stack)
}

/// shared body of the entry point binaries: declare one stack, synthesize.
pub fn synth_single<F>(define: F) -> Result<()>
where
    F: FnOnce(&mut App) -> Result<&mut Stack>,
{
    let mut app = App::new();
    let stack = define(&mut app)?;
    tracing::info!(stack = %stack.stack_name(), "declared");
    let assembly = app.synth()?;
    tracing::info!(outdir = %assembly.directory.display(), "synthesis complete");
    Ok(())
}
