//! Replay scripted store actions.
//!
//! A script has one JSON object per line; blank lines and lines starting
//! with `#` are skipped.
//!
//! ```text
//! {"action": "add_to_cart", "id": "1", "variant": "product"}
//! {"action": "set_quantity", "id": "1", "variant": "product", "quantity": 3}
//! {"action": "remove_favorite", "id": "lalibela", "variant": "tour"}
//! {"action": "update_profile", "preferred_language": "amharic"}
//! {"action": "clear_cart"}
//! ```

use std::io::Read;

use heritage_core::{ItemId, ItemRef, Variant};
use heritage_showcase::AppState;
use heritage_showcase::catalog::VariantGroup;
use heritage_showcase::store::{ProfileUpdate, StoreEvent};
use serde::Deserialize;
use tokio::sync::broadcast::{self, error::TryRecvError};
use tracing::{debug, info};

use super::CommandError;

/// One scripted action.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum SessionAction {
    AddFavorite { id: ItemId, variant: Variant },
    RemoveFavorite { id: ItemId, variant: Variant },
    AddToCart { id: ItemId, variant: Variant },
    RemoveFromCart { id: ItemId, variant: Variant },
    SetQuantity {
        id: ItemId,
        variant: Variant,
        quantity: i64,
    },
    ClearCart,
    UpdateProfile(ProfileUpdate),
}

/// Parse a script into actions, numbering lines from 1.
///
/// # Errors
///
/// Returns `CommandError::Script` for the first line that is not a valid
/// action.
pub fn parse_script(script: &str) -> Result<Vec<SessionAction>, CommandError> {
    script
        .lines()
        .enumerate()
        .filter(|(_, line)| {
            let line = line.trim();
            !line.is_empty() && !line.starts_with('#')
        })
        .map(|(index, line)| {
            serde_json::from_str(line).map_err(|source| CommandError::Script {
                line: index + 1,
                source,
            })
        })
        .collect()
}

/// Apply one action, returning a short description of what happened.
///
/// # Errors
///
/// Returns an error if an added item does not exist in the catalog.
pub fn apply(state: &AppState, action: SessionAction) -> Result<String, CommandError> {
    let store = state.user();
    let message = match action {
        SessionAction::AddFavorite { id, variant } => {
            let key = ItemRef::new(id, variant);
            let item = state.item(&key)?;
            if store.add_favorite(&item) {
                format!("favorited {key}")
            } else {
                format!("{key} already a favorite")
            }
        }
        SessionAction::RemoveFavorite { id, variant } => {
            let key = ItemRef::new(id, variant);
            if store.remove_favorite(&key) {
                format!("unfavorited {key}")
            } else {
                format!("{key} was not a favorite")
            }
        }
        SessionAction::AddToCart { id, variant } => {
            let key = ItemRef::new(id, variant);
            let quantity = state.add_to_cart(&key)?;
            format!("{key} quantity now {quantity}")
        }
        SessionAction::RemoveFromCart { id, variant } => {
            let key = ItemRef::new(id, variant);
            if store.remove_from_cart(&key) {
                format!("removed {key} from cart")
            } else {
                format!("{key} was not in the cart")
            }
        }
        SessionAction::SetQuantity {
            id,
            variant,
            quantity,
        } => {
            let key = ItemRef::new(id, variant);
            if store.set_cart_quantity(&key, quantity) {
                format!("{key} quantity set to {}", quantity.max(0))
            } else {
                format!("{key} not in cart, quantity unchanged")
            }
        }
        SessionAction::ClearCart => format!("cleared {} cart entries", store.clear_cart()),
        SessionAction::UpdateProfile(update) => {
            store.update_profile(update);
            "profile updated".to_owned()
        }
    };
    Ok(message)
}

/// Replay `script` against the seeded store and print the result.
///
/// # Errors
///
/// Returns an error if the script cannot be read or parsed, or an action
/// references an unknown item.
#[allow(clippy::print_stdout)]
pub fn run(state: &AppState, script: &str, json: bool) -> Result<(), CommandError> {
    let text = if script == "-" {
        let mut buf = String::new();
        std::io::stdin().read_to_string(&mut buf)?;
        buf
    } else {
        std::fs::read_to_string(script)?
    };
    let actions = parse_script(&text)?;
    info!(actions = actions.len(), "Replaying session");

    let mut events = state.user().subscribe();
    let mut tally = EventTally::default();
    for action in actions {
        let message = apply(state, action)?;
        tally.drain(&mut events);
        debug!("{message}");
        if !json {
            println!("{message}");
        }
    }
    info!(
        notifications = tally.notifications,
        cart_changes = tally.cart_changes,
        "Session replayed"
    );

    let store = state.user();
    if json {
        println!("{}", serde_json::to_string_pretty(&store.snapshot())?);
        return Ok(());
    }

    println!();
    println!("Favorites");
    print_groups(&state.favorite_groups(), |entry| entry.item.title.clone());

    println!();
    println!("Cart");
    print_groups(&state.cart_groups(), |entry| {
        format!(
            "{} x{} @ {} = {}",
            entry.item.title,
            entry.quantity,
            entry.unit_price,
            entry.line_total()
        )
    });
    println!();
    println!(
        "{} items, total {}",
        store.cart_item_count(),
        store.cart_total()
    );

    Ok(())
}

/// Store notifications seen while replaying.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct EventTally {
    pub notifications: u64,
    pub cart_changes: u64,
}

impl EventTally {
    /// Count everything queued on `events`.
    ///
    /// Events dropped because the receiver lagged still count as
    /// notifications; their kind is unknown.
    pub fn drain(&mut self, events: &mut broadcast::Receiver<StoreEvent>) {
        loop {
            match events.try_recv() {
                Ok(event) => {
                    self.notifications += 1;
                    if event == StoreEvent::CartChanged {
                        self.cart_changes += 1;
                    }
                }
                Err(TryRecvError::Lagged(missed)) => self.notifications += missed,
                Err(TryRecvError::Empty | TryRecvError::Closed) => break,
            }
        }
    }
}

#[allow(clippy::print_stdout)]
fn print_groups<T>(groups: &[VariantGroup<T>], line: impl Fn(&T) -> String) {
    if groups.is_empty() {
        println!("  (empty)");
    }
    for group in groups {
        println!("  {} ({})", group.label, group.entries.len());
        for entry in &group.entries {
            println!("    {}", line(entry));
        }
    }
}
