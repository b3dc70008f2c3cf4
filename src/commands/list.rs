//! Listing commands - grammars and token types

use tokenkit::output::{GrammarList, GrammarSummary, OutputMode, TypeTree};
use tokenkit::registry::GrammarRegistry;

/// List the registered grammars
pub fn grammars(output_mode: OutputMode) -> anyhow::Result<()> {
    let registry = GrammarRegistry::builtin();
    let list = GrammarList {
        grammars: registry.all().into_iter().map(GrammarSummary::from).collect(),
    };
    list.render(output_mode);
    Ok(())
}

/// Show the token type hierarchy
pub fn types(output_mode: OutputMode) -> anyhow::Result<()> {
    TypeTree::current().render(output_mode);
    Ok(())
}
