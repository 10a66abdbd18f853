use std::io::{self, Write};

use super::{Block, Screen};

pub fn write_screen(screen: &Screen, w: &mut dyn Write) -> io::Result<()> {
    for block in &screen.blocks {
        write_block(block, w)?;
    }
    Ok(())
}

fn write_block(block: &Block, w: &mut dyn Write) -> io::Result<()> {
    match block {
        Block::Spinner { text } => writeln!(w, "⏳ {text}"),
        Block::ErrorBanner { message } => writeln!(w, "❌ {message}"),
        Block::Status { text } => writeln!(w, "… {text}"),
        Block::Notice { text } => writeln!(w, "ℹ️  {text}"),
        Block::FlyerGrid { tiles, clickable } => {
            let hint = if *clickable { "select by id" } else { "processing, selection disabled" };
            writeln!(w, "🛒 Grocery flyers ({}) — {hint}", tiles.len())?;
            for t in tiles {
                let marker = if t.selected { '*' } else { ' ' };
                writeln!(w, " {marker} [{}] {}", t.id, t.merchant)?;
            }
            Ok(())
        }
        Block::MealPlanPanel { merchant, days, shopping_list } => {
            writeln!(w, "🍽  Meal plan — {merchant}")?;
            for d in days {
                writeln!(w, "  {:<10} {}", d.day, d.meal)?;
            }
            writeln!(w, "🧾 Shopping list")?;
            for item in shopping_list {
                writeln!(w, "  - {item}")?;
            }
            Ok(())
        }
        Block::ItemTable { store, rows } => {
            writeln!(w, "📦 Items for {store} ({})", rows.len())?;
            for r in rows {
                let qty = match (r.measured_quantity_value, r.measured_quantity_unit.as_deref()) {
                    (Some(v), Some(u)) => format!(" ({v} {u})"),
                    _ => String::new(),
                };
                let per = match r.selling_value {
                    Some(n) if n != 1.0 => format!("{n} {}", r.selling_unit),
                    _ => r.selling_unit.clone(),
                };
                writeln!(w, "  {:<32} ${:>7.2} / {per}{qty}", r.name, r.price)?;
            }
            Ok(())
        }
    }
}
