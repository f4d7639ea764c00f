//! Interactive shell. Dispatches menu choices into the checkout workflow.
//!
//! Generic over reader/writer so the suites can script a whole session.
//! Workflow errors are printed and the loop continues; only I/O failures on
//! the terminal itself end the session.

use std::io::{self, BufRead, Write};

use coinop_common::game::GameId;
use coinop_common::machine::{MachineId, Material};
use coinop_common::user::UserId;
use coinop_common::validate;

use crate::checkout::{self, Checkout};
use crate::store::Stores;

const MENU: &str = "\n1. Create User\n2. Show Games\n3. Show Machines\n4. Buy Machine\n5. Review Game\n6. View Purchases\n7. Exit";

/// Run the menu loop until the user exits or input runs dry.
pub fn run<R: BufRead, W: Write>(stores: &Stores, input: &mut R, out: &mut W) -> io::Result<()> {
    writeln!(out, "Welcome to the arcade machine catalog.")?;
    loop {
        writeln!(out, "{MENU}")?;
        let Some(choice) = prompt(input, out, "Choose an option: ")? else {
            return Ok(());
        };
        match choice.as_str() {
            "1" => create_user(stores, input, out)?,
            "2" => show_games(stores, out)?,
            "3" => show_machines(stores, out)?,
            "4" => buy_machine(stores, input, out)?,
            "5" => review_game(stores, input, out)?,
            "6" => view_purchases(stores, input, out)?,
            "7" => {
                writeln!(out, "Goodbye.")?;
                return Ok(());
            }
            _ => writeln!(out, "Invalid option. Please try again.")?,
        }
    }
}

/// Print `label`, read one trimmed line. `None` means end of input.
fn prompt<R: BufRead, W: Write>(
    input: &mut R,
    out: &mut W,
    label: &str,
) -> io::Result<Option<String>> {
    write!(out, "{label}")?;
    out.flush()?;
    let mut line = String::new();
    if input.read_line(&mut line)? == 0 {
        return Ok(None);
    }
    Ok(Some(line.trim().to_string()))
}

/// Re-prompt until the user id parses as a number.
fn prompt_user_id<R: BufRead, W: Write>(
    input: &mut R,
    out: &mut W,
    label: &str,
) -> io::Result<Option<UserId>> {
    loop {
        let Some(line) = prompt(input, out, label)? else {
            return Ok(None);
        };
        match line.parse::<u32>() {
            Ok(n) => return Ok(Some(UserId(n))),
            Err(_) => writeln!(out, "User ID must be a number.")?,
        }
    }
}

fn create_user<R: BufRead, W: Write>(
    stores: &Stores,
    input: &mut R,
    out: &mut W,
) -> io::Result<()> {
    let name = loop {
        let Some(name) = prompt(input, out, "Enter your name: ")? else {
            return Ok(());
        };
        if validate::valid_name(&name) {
            break name;
        }
        writeln!(out, "Name must contain only letters and spaces. Please try again.")?;
    };
    let phone = loop {
        let Some(phone) = prompt(input, out, "Enter your phone number: ")? else {
            return Ok(());
        };
        if validate::valid_phone(&phone) {
            break phone;
        }
        writeln!(
            out,
            "Phone number must be digits only with a maximum of 15 characters. Please try again."
        )?;
    };
    match checkout::register_user(stores, &name, &phone) {
        Ok(user) => writeln!(out, "User created with ID: {}", user.id)?,
        Err(err) => writeln!(out, "Could not create user: {err}")?,
    }
    Ok(())
}

fn show_games<W: Write>(stores: &Stores, out: &mut W) -> io::Result<()> {
    let games = match stores.games.load() {
        Ok(games) => games,
        Err(err) => {
            writeln!(out, "Could not load games: {err}")?;
            return Ok(());
        }
    };
    if games.is_empty() {
        writeln!(out, "No games available.")?;
        return Ok(());
    }
    writeln!(out, "Available games:")?;
    for game in &games {
        writeln!(
            out,
            "- Code: {}, Title: {} ({}), Price: ${:.2}",
            game.id, game.title, game.category, game.price
        )?;
        for review in &game.reviews {
            writeln!(out, "    \"{}\" (User ID: {})", review.text, review.user_id)?;
        }
    }
    Ok(())
}

fn show_machines<W: Write>(stores: &Stores, out: &mut W) -> io::Result<()> {
    let machines = match stores.machines.load() {
        Ok(machines) => machines,
        Err(err) => {
            writeln!(out, "Could not load machines: {err}")?;
            return Ok(());
        }
    };
    if machines.is_empty() {
        writeln!(out, "No machines available.")?;
        return Ok(());
    }
    writeln!(out, "Available machines:")?;
    for machine in &machines {
        let specs = machine.specs();
        writeln!(
            out,
            "- Code: {}, Type: {}, Material: {}, Color: {}, Players: {}",
            machine.id,
            machine.kind,
            machine.material(),
            machine.color,
            machine.player_count
        )?;
        writeln!(
            out,
            "  Dimensions: {}, Weight: {:.1} kg, Power: {:.0} W",
            specs.dimensions, specs.weight, specs.power_consumption
        )?;
        writeln!(
            out,
            "  Processor: {}, Memory: {}, Base Price: ${:.2}",
            specs.processor, specs.memory, specs.base_price
        )?;
    }
    Ok(())
}

fn buy_machine<R: BufRead, W: Write>(
    stores: &Stores,
    input: &mut R,
    out: &mut W,
) -> io::Result<()> {
    let Some(user_id) = prompt_user_id(input, out, "Enter your user ID: ")? else {
        return Ok(());
    };
    let checkout = match Checkout::begin(stores, user_id) {
        Ok(checkout) => checkout,
        Err(err) => {
            writeln!(out, "{err}")?;
            return Ok(());
        }
    };

    let Some(code) = prompt(input, out, "Enter the machine code you want to buy: ")? else {
        return Ok(());
    };
    let mut order = match checkout.select_machine(&MachineId(code)) {
        Ok(order) => order,
        Err(err) => {
            writeln!(out, "{err}")?;
            return Ok(());
        }
    };

    let Some(change) = prompt(input, out, "Do you want to change the material? (yes/no): ")?
    else {
        return Ok(());
    };
    if change.eq_ignore_ascii_case("yes") {
        let Some(material) =
            prompt(input, out, "Enter new material (wood/aluminum/carbon fiber): ")?
        else {
            return Ok(());
        };
        order.set_material(Material::parse(&material));
    }

    loop {
        let label = format!(
            "Enter number of players (current is {}, blank to keep): ",
            order.machine().player_count
        );
        let Some(count) = prompt(input, out, &label)? else {
            return Ok(());
        };
        if count.is_empty() {
            break;
        }
        match count.parse::<u32>() {
            Ok(n) if n > 0 => {
                if let Err(err) = order.set_player_count(n) {
                    writeln!(out, "{err}")?;
                    continue;
                }
                break;
            }
            _ => writeln!(out, "Player count must be a positive number.")?,
        }
    }

    let label = format!("Enter color (current is {}, blank to keep): ", order.machine().color);
    let Some(color) = prompt(input, out, &label)? else {
        return Ok(());
    };
    if !color.is_empty() {
        order.set_color(color);
    }

    loop {
        let Some(code) = prompt(input, out, "Enter game code to add (or 'done' to finish): ")?
        else {
            return Ok(());
        };
        if code.eq_ignore_ascii_case("done") {
            break;
        }
        match order.attach_game(&GameId(code)) {
            Ok(title) => writeln!(out, "Added game: {title}")?,
            Err(err) => writeln!(out, "{err}")?,
        }
    }

    writeln!(out, "Total price: ${:.2}", order.total_price())?;
    let Some(address) = prompt(input, out, "Enter your delivery address: ")? else {
        return Ok(());
    };
    match order.finalize(&address) {
        Ok(purchase) => writeln!(
            out,
            "Purchase completed for user {}. Total: ${:.2}",
            purchase.user_id, purchase.total_price
        )?,
        Err(err) => writeln!(out, "Could not record purchase: {err}")?,
    }
    Ok(())
}

fn review_game<R: BufRead, W: Write>(
    stores: &Stores,
    input: &mut R,
    out: &mut W,
) -> io::Result<()> {
    let Some(user_id) = prompt_user_id(input, out, "Enter your user ID: ")? else {
        return Ok(());
    };
    let Some(code) = prompt(input, out, "Enter the code of the game to review: ")? else {
        return Ok(());
    };
    let Some(text) = prompt(input, out, "Enter your review: ")? else {
        return Ok(());
    };
    match checkout::add_review(stores, user_id, &GameId(code), &text) {
        Ok(()) => writeln!(out, "Review added.")?,
        Err(err) => writeln!(out, "Could not add review: {err}")?,
    }
    Ok(())
}

fn view_purchases<R: BufRead, W: Write>(
    stores: &Stores,
    input: &mut R,
    out: &mut W,
) -> io::Result<()> {
    let Some(user_id) = prompt_user_id(input, out, "Enter your user ID to view purchases: ")?
    else {
        return Ok(());
    };
    let purchases = match checkout::purchase_history(stores, user_id) {
        Ok(purchases) => purchases,
        Err(err) => {
            writeln!(out, "Could not load purchases: {err}")?;
            return Ok(());
        }
    };
    if purchases.is_empty() {
        writeln!(out, "No purchases found for this ID.")?;
        return Ok(());
    }
    for purchase in &purchases {
        let machine = &purchase.machine;
        writeln!(
            out,
            "- {}: {} ({}, {}, {} players)",
            purchase.purchase_date.format("%Y-%m-%d"),
            machine.kind,
            machine.material,
            machine.color,
            machine.player_count
        )?;
        if machine.games_added.is_empty() {
            writeln!(out, "  Games: none")?;
        } else {
            writeln!(out, "  Games: {}", machine.games_added.join(", "))?;
        }
        writeln!(out, "  Delivered to: {}", purchase.address)?;
        writeln!(out, "  Total: ${:.2}", purchase.total_price)?;
    }
    Ok(())
}
