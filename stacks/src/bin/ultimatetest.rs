use cdkstarter::StackProps;
use cdkstarter_stacks::ultimate_test::{ultimate_test_stack, STACK_ID};

fn main() {
    cdkstarter::logging::init_from_env();
    if let Err(e) = cdkstarter_stacks::synth_single(|app| ultimate_test_stack(app, STACK_ID, StackProps::default())) {
        tracing::error!("{e}");
        std::process::exit(1);
    }
}
