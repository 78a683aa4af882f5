//! `repl::inventory` module
//!
//! Handlers for listing and using carried items.

use anyhow::Result;
use log::info;

use crate::game::{Flow, Game};
use crate::view::ViewItem;

/// List the player's inventory.
pub fn inv_handler(game: &mut Game) -> Flow {
    if game.session.inventory.is_empty() {
        game.view.push(ViewItem::Narration("You aren't carrying anything.".into()));
    } else {
        let items = game
            .session
            .inventory
            .list()
            .into_iter()
            .map(|(name, description)| (name.to_string(), description.to_string()))
            .collect();
        game.view.push(ViewItem::Inventory(items));
    }
    Flow::Continue
}

/// Use an item. With no item named, lists the inventory and asks which one.
///
/// # Errors
/// - on console failure
pub fn use_handler(game: &mut Game, item: Option<&str>) -> Result<Flow> {
    let name = if let Some(item) = item {
        item.to_string()
    } else {
        if game.session.inventory.is_empty() {
            game.view.push(ViewItem::Narration("You have nothing to use.".into()));
            return Ok(Flow::Continue);
        }
        let mut options: Vec<String> = game.session.inventory.kinds().into_iter().map(str::to_string).collect();
        options.push("nothing".to_string());
        game.view.push(ViewItem::Menu {
            prompt: "Use what?".into(),
            options: options.clone(),
        });
        game.flush()?;
        let allowed: Vec<&str> = options.iter().map(String::as_str).collect();
        let choice = game.console.prompt_choice(&allowed)?;
        if choice == "nothing" {
            return Ok(Flow::Continue);
        }
        choice
    };

    let session = &mut game.session;
    match session.inventory.use_item(&name, &mut session.vitals) {
        Ok(report) => {
            game.view.push(ViewItem::ActionSuccess(format!(
                "You use the {}. {} +{}.",
                report.item, report.resource, report.restored
            )));
        },
        Err(err) => {
            info!("could not use '{name}': {err}");
            game.view.push(ViewItem::ActionFailure(err.to_string()));
        },
    }
    Ok(Flow::Continue)
}
