use anyhow::{Result, anyhow};
use colored::Colorize;
use log::info;
use serde_json::{Value, json};
use slot_menus::menu::ROW_WIDTH;
use slot_menus::text::strip_colors;
use slot_menus::{
    Click, GridMenu, GridMenuBuilder, HeadlessHost, Item, ItemBuilder, MenuCommand, MenuConfig,
    MenuId, MenuRegistry, PageSource, PagedMenu, SlotGrid, UserId,
};
use std::collections::HashSet;
use std::sync::{Arc, Mutex};

use crate::cli::commands::DemoArgs;

const MAIN_MENU: &str = "&6Main Menu";
const WAREHOUSE: &str = "&3Warehouse";

/// Crate numbers in the warehouse, shared with handlers and background tasks
type Stock = Arc<Mutex<Vec<u32>>>;

struct Warehouse {
    stock: Stock,
}

impl PageSource for Warehouse {
    type Element = u32;

    fn to_element(&self, item: &Item) -> Option<u32> {
        strip_colors(item.display_name.as_deref()?)
            .strip_prefix("Crate #")?
            .parse()
            .ok()
    }

    fn to_item(&self, id: &u32) -> Item {
        ItemBuilder::new("CHEST")
            .display_name(&format!("&fCrate #{}", id))
            .add_lore_line("&7Click to inspect")
            .build()
    }

    fn source(&self, _user: UserId) -> Vec<u32> {
        self.stock
            .lock()
            .map(|stock| stock.clone())
            .unwrap_or_default()
    }

    fn on_select(&self, _click: &Click, id: u32, attachment: Option<&Value>) -> MenuCommand {
        let site = attachment
            .and_then(|value| value["site"].as_str())
            .unwrap_or("an unknown site");
        MenuCommand::message(format!("&7Crate &f#{}&7 is stored at &f{}", id, site))
    }
}

fn main_menu(notifications: Arc<Mutex<HashSet<UserId>>>, stock: Stock) -> GridMenu {
    let toggled = Arc::clone(&notifications);

    GridMenuBuilder::new(MAIN_MENU)
        .main_menu()
        .item(
            ItemBuilder::new("CHEST")
                .display_name("&3Warehouse")
                .add_lore_line("&7Browse stored crates")
                .build(),
            |_, _| MenuCommand::open_with(WAREHOUSE, json!({ "site": "north dock" })),
        )
        .toggle("&eNotifications", move |click, _| {
            if let Ok(mut users) = notifications.lock() {
                if !users.remove(&click.user) {
                    users.insert(click.user);
                }
            }
            MenuCommand::Redraw
        })
        .item(
            ItemBuilder::new("BARRIER")
                .display_name("&cClear Stock")
                .build(),
            move |_, _| {
                let stock = Arc::clone(&stock);
                MenuCommand::confirm_titled("&cClear the warehouse?", move |confirmation| {
                    if !confirmation.status.is_successful() {
                        return MenuCommand::message("&7Nothing was changed");
                    }

                    if let Ok(mut crates) = stock.lock() {
                        crates.clear();
                    }

                    MenuCommand::batch(vec![
                        MenuCommand::message("&aWarehouse cleared"),
                        MenuCommand::Refresh(MenuId::new(WAREHOUSE)),
                    ])
                })
            },
        )
        .toggle_state(move |user, raw_name| {
            raw_name == "NOTIFICATIONS"
                && toggled
                    .lock()
                    .map(|users| users.contains(&user))
                    .unwrap_or(false)
        })
        .build()
}

fn label(item: &Item) -> String {
    item.display_name
        .as_deref()
        .map(strip_colors)
        .unwrap_or_else(|| item.material.clone())
}

fn print_grid(grid: &SlotGrid) {
    println!(
        "  {} {}",
        strip_colors(grid.title()).bold(),
        format!("({} slots)", grid.size()).dimmed()
    );

    for row in 0..grid.rows() {
        let cells: Vec<String> = (0..ROW_WIDTH)
            .map(|column| match grid.get(row * ROW_WIDTH + column) {
                Some(item) => {
                    let short: String = item.material.chars().take(3).collect();
                    format!("{:<3}", short).yellow().to_string()
                }
                None => " · ".dimmed().to_string(),
            })
            .collect();
        println!("  {}", cells.join(" "));
    }

    for (slot, item) in grid.iter() {
        println!("    {:>2}: {}", slot, label(item));
    }
}

fn show(registry: &MenuRegistry<HeadlessHost>, user: UserId, step: &str) {
    println!("\n{} {}", "▸".cyan(), step.bold());

    match registry.host().grid(user) {
        Some(grid) => print_grid(grid),
        None => println!("  {}", "(nothing open)".dimmed()),
    }
}

/// Click the first item whose name contains `name`, if one is visible
fn click(registry: &mut MenuRegistry<HeadlessHost>, user: UserId, name: &str) -> Result<()> {
    let slot = registry.host().grid(user).and_then(|grid| {
        grid.iter()
            .find(|(_, item)| label(item).contains(name))
            .map(|(slot, _)| slot)
    });

    let Some(click) = slot.and_then(|slot| registry.host().click_slot(user, slot)) else {
        println!("  {}", format!("(no '{}' item to click)", name).dimmed());
        return Ok(());
    };

    registry.click(click)
}

fn print_messages(registry: &MenuRegistry<HeadlessHost>, user: UserId, name: &str) {
    println!("\n{} {}", "Messages for".bold(), name.bold());

    let messages = registry.host().messages(user);
    if messages.is_empty() {
        println!("  {}", "(none)".dimmed());
    }
    for message in messages {
        println!("  {}", strip_colors(message).green());
    }
}

pub async fn demo_command(args: DemoArgs) -> Result<()> {
    let mut config = match &args.config {
        Some(path) => MenuConfig::load_from(path)?,
        None => MenuConfig::load()?,
    };
    if let Some(rows) = args.max_rows {
        config.pagination.max_rows = rows;
    }

    info!("Running demo with {} crates", args.stock);

    let stock: Stock = Arc::new(Mutex::new((1..=args.stock).collect()));
    let notifications = Arc::new(Mutex::new(HashSet::new()));

    let mut registry = MenuRegistry::new(HeadlessHost::new(), config);
    registry.init();
    let main = registry.register(main_menu(notifications, Arc::clone(&stock)));
    let warehouse = registry.register(PagedMenu::new(
        WAREHOUSE,
        Warehouse {
            stock: Arc::clone(&stock),
        },
    ));
    info!("Demo menus registered: {}, {}", main, warehouse);

    let alice = UserId::new();
    let bob = UserId::new();
    registry.host_mut().connect(alice);
    registry.host_mut().connect(bob);

    registry.open(alice, MAIN_MENU, None)?;
    show(&registry, alice, "Alice opens the main menu");

    click(&mut registry, alice, "Notifications")?;
    show(&registry, alice, "Alice turns notifications on");

    click(&mut registry, alice, "Warehouse")?;
    show(&registry, alice, "Alice opens the warehouse");

    click(&mut registry, alice, "Next Page")?;
    show(&registry, alice, "Alice flips to the next page");

    click(&mut registry, alice, "Crate #")?;
    click(&mut registry, alice, "Next Page")?;
    click(&mut registry, alice, "Go Back")?;
    show(&registry, alice, "Alice inspects a crate and goes back");

    let site = json!({ "site": "north dock" });
    registry.open(bob, WAREHOUSE, Some(site.clone()))?;
    show(&registry, bob, "Bob opens the warehouse");

    click(&mut registry, alice, "Clear Stock")?;
    show(&registry, alice, "Alice asks to clear the stock");

    click(&mut registry, alice, "Confirm")?;
    show(&registry, alice, "Alice confirms");

    let redrawn = registry.run_scheduled();
    println!("\n{} {} view(s)", "Scheduled refresh redrew".bold(), redrawn);
    show(&registry, bob, "Bob's warehouse after the refresh");

    stock
        .lock()
        .map_err(|_| anyhow!("Warehouse stock lock poisoned"))?
        .extend(100..103);
    let handle = registry.refresh_handle();
    let restocked = warehouse.clone();
    tokio::spawn(async move { handle.request(&restocked) }).await?;
    registry.run_scheduled();
    show(&registry, bob, "Bob's warehouse after a restock from a background task");

    println!(
        "\n{} {}",
        "Menus holding the north dock:".bold(),
        registry.find_by_attachment(&site).len()
    );
    registry.host_mut().disconnect(bob);
    println!(
        "{} {}",
        "After Bob disconnects:".bold(),
        registry.find_by_attachment(&site).len()
    );
    registry.on_user_disconnect(bob);

    print_messages(&registry, alice, "Alice");
    print_messages(&registry, bob, "Bob");

    registry.shutdown();
    Ok(())
}
