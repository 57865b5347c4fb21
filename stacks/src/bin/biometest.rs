use cdkstarter::StackProps;
use cdkstarter_stacks::biome_test::{biome_test_stack, STACK_ID};

fn main() {
    cdkstarter::logging::init_from_env();
    if let Err(e) = cdkstarter_stacks::synth_single(|app| biome_test_stack(app, STACK_ID, StackProps::default())) {
        tracing::error!("{e}");
        std::process::exit(1);
    }
}
