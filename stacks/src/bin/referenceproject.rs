use cdkstarter::StackProps;
use cdkstarter_stacks::reference_project::{reference_project_stack, STACK_ID};

fn main() {
    cdkstarter::logging::init_from_env();
    if let Err(e) = cdkstarter_stacks::synth_single(|app| reference_project_stack(app, STACK_ID, StackProps::default())) {
        tracing::error!("{e}");
        std::process::exit(1);
    }
}
