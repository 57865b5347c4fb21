use cdkstarter::resources::{FUNCTION_TYPE, LOG_GROUP_TYPE};
use cdkstarter::{App, Error, StackProps, Template};
use cdkstarter_stacks::biome_test::biome_test_stack;
use cdkstarter_stacks::reference_project::{self, reference_project_stack};
use cdkstarter_stacks::ultimate_test::{self, ultimate_test_stack};
use serde_json::json;

type DefineStack = for<'a> fn(&'a mut App, &str, StackProps) -> cdkstarter::Result<&'a mut cdkstarter::Stack>;

fn app() -> App {
    App::with_outdir("unused")
}

fn function_only_template() -> Template {
    let mut app = app();
    let stack = biome_test_stack(&mut app, "MyTestStack", StackProps::default()).unwrap();
    stack.template()
}

#[test]
fn stack_has_a_function() {
    let template = function_only_template();
    assert!(template.resource_count_is(FUNCTION_TYPE, 1));
    assert!(template.has_resource_properties(FUNCTION_TYPE, &json!({ "Runtime": "nodejs20.x" })));
}

#[test]
fn function_only_stack_has_no_log_group() {
    let template = function_only_template();
    assert!(template.resource_count_is(LOG_GROUP_TYPE, 0));
}

#[test]
fn function_is_bundled_as_minified_esm_with_source_maps() {
    let template = function_only_template();
    assert!(template.has_resource_properties(FUNCTION_TYPE, &json!({
        "Handler": "index.handler",
        "Environment": { "Variables": { "NODE_OPTIONS": "--enable-source-maps" } },
    })));
    assert!(template.has_resource(FUNCTION_TYPE, &json!({
        "Metadata": { "cdkstarter:bundling": {
            "entry": "../functions/index.ts",
            "options": {
                "minify": true,
                "mainFields": ["module", "main"],
                "sourceMap": true,
                "format": "esm",
            },
        } },
    })));
}

#[test]
fn function_arn_is_the_only_output() {
    let template = function_only_template();
    let (function_id, _) = template.find_resources(FUNCTION_TYPE)[0];
    assert_eq!(template.outputs.len(), 1);
    assert!(template.has_output("FunctionArn", &json!({ "Value": { "Fn::GetAtt": [function_id, "Arn"] } })));
}

#[test]
fn log_group_stacks_pin_node_22_and_one_day_retention() {
    let cases = [
        (reference_project_stack as DefineStack, reference_project::FUNCTION_NAME),
        (ultimate_test_stack as DefineStack, ultimate_test::FUNCTION_NAME),
    ];
    for (define, function_name) in cases {
        let mut app = app();
        let template = define(&mut app, "MyTestStack", StackProps::default()).unwrap().template();

        assert!(template.resource_count_is(FUNCTION_TYPE, 1));
        assert!(template.resource_count_is(LOG_GROUP_TYPE, 1));
        assert!(template.has_resource_properties(FUNCTION_TYPE, &json!({
            "Runtime": "nodejs22.x",
            "FunctionName": function_name,
        })));
        assert!(template.has_resource(LOG_GROUP_TYPE, &json!({
            "Properties": {
                "LogGroupName": format!("/aws/lambda/{function_name}"),
                "RetentionInDays": 1,
            },
            "DeletionPolicy": "Delete",
            "UpdateReplacePolicy": "Delete",
        })));

        let (log_group_id, _) = template.find_resources(LOG_GROUP_TYPE)[0];
        assert!(template.has_resource_properties(FUNCTION_TYPE, &json!({
            "LoggingConfig": { "LogGroup": { "Ref": log_group_id } },
        })));
    }
}

#[test]
fn same_id_twice_in_one_app_fails() {
    let mut app = app();
    biome_test_stack(&mut app, "MyTestStack", StackProps::default()).unwrap();
    let err = reference_project_stack(&mut app, "MyTestStack", StackProps::default()).unwrap_err();
    assert!(matches!(err, Error::DuplicateId { .. }));
}

#[test]
fn all_stacks_can_live_in_one_app() {
    let mut app = app();
    biome_test_stack(&mut app, "BiomeTestStack", StackProps::default()).unwrap();
    reference_project_stack(&mut app, "ReferenceProjectStack", StackProps::default()).unwrap();
    ultimate_test_stack(&mut app, "UltimateTestStack", StackProps::default()).unwrap();
    assert_eq!(app.stacks().count(), 3);
}

#[test]
fn logical_ids_are_stable_across_synths() {
    let a = function_only_template();
    let b = function_only_template();
    assert_eq!(a, b);
}

#[test]
fn synth_writes_one_template_per_stack() {
    let dir = tempfile::tempdir().unwrap();
    let mut app = App::with_outdir(dir.path());
    biome_test_stack(&mut app, "BiomeTestStack", StackProps::default()).unwrap();
    ultimate_test_stack(&mut app, "UltimateTestStack", StackProps::default()).unwrap();
    let assembly = app.synth().unwrap();

    assert_eq!(assembly.templates.len(), 2);
    let body = std::fs::read_to_string(dir.path().join("UltimateTestStack.template.json")).unwrap();
    let template = Template::from_json(&body).unwrap();
    assert!(template.has_resource_properties(FUNCTION_TYPE, &json!({ "Runtime": "nodejs22.x" })));
}
