use serde_json::{json, Value};

use crate::template::CfnResource;

pub const LAMBDA_BASIC_EXECUTION_POLICY: &str = "arn:aws:iam::aws:policy/service-role/AWSLambdaBasicExecutionRole";

#[derive(Debug, Clone)]
pub struct CfnRole {
    /// service principal allowed to assume this role, eg: `lambda.amazonaws.com`
    pub assumed_by: String,
    pub managed_policy_arns: Vec<String>,
}

impl CfnRole {
    pub fn lambda_execution_role() -> Self {
        Self {
            assumed_by: "lambda.amazonaws.com".into(),
            managed_policy_arns: vec![LAMBDA_BASIC_EXECUTION_POLICY.into()],
        }
    }
}

impl CfnResource for CfnRole {
    fn type_string(&self) -> &'static str {
        "AWS::IAM::Role"
    }

    fn properties(&self) -> Value {
        json!({
            "AssumeRolePolicyDocument": {
                "Version": "2012-10-17",
                "Statement": [{
                    "Effect": "Allow",
                    "Principal": { "Service": self.assumed_by },
                    "Action": "sts:AssumeRole",
                }],
            },
            "ManagedPolicyArns": self.managed_policy_arns,
        })
    }
}
