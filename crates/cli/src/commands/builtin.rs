//! Shell built-ins: help, quit, clear

use async_trait::async_trait;

use crate::shell::{CommandHandler, CommandRegistry, Flow, HELP_COMMAND, Session};

pub fn register(registry: &mut CommandRegistry) {
    registry.register(HELP_COMMAND, "Show this help", Help);
    registry.register("q", "Quit the shell (Ctrl+C also works)", Quit);
    registry.register("clear", "Clear the screen", Clear);
}

/// Print every registered command as `name<TAB>description`, sorted by name
pub struct Help;

#[async_trait]
impl CommandHandler for Help {
    async fn run(&self, session: &mut Session, _param: &str) -> Flow {
        let registry = session.registry();
        for (name, description) in registry.list_all() {
            session.out().println(&format!("{name}\t{description}"));
        }
        Flow::Continue
    }
}

pub struct Quit;

#[async_trait]
impl CommandHandler for Quit {
    async fn run(&self, _session: &mut Session, _param: &str) -> Flow {
        Flow::Stop
    }
}

pub struct Clear;

#[async_trait]
impl CommandHandler for Clear {
    async fn run(&self, session: &mut Session, _param: &str) -> Flow {
        session.out().clear_screen();
        Flow::Continue
    }
}
