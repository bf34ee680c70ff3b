//! Cart commands.

use anyhow::Result;
use serde::Serialize;
use shelfcart::prelude::*;

use super::{AddArgs, AddJsonArgs, RemoveArgs};
use crate::context::Context;

/// JSON summary printed after every cart command.
#[derive(Serialize)]
struct CartReport<'a> {
    ok: bool,
    count: usize,
    capacity: usize,
    phase: &'static str,
    items: &'a [CartEntry],
    notices: Vec<Notice>,
}

/// Cart summary printed by the status command.
#[derive(Debug, PartialEq, Serialize)]
struct StatusReport {
    phase: &'static str,
    count: usize,
    capacity: usize,
    remaining: usize,
}

impl StatusReport {
    fn of<S: shelfcart_store::KvStore, N: NoticeSink>(cart: &CartManager<S, N>) -> Self {
        Self {
            phase: cart.phase().as_str(),
            count: cart.cart_item_count(),
            capacity: MAX_CART_ITEMS,
            remaining: cart.remaining_capacity(),
        }
    }
}

/// Show the cart's phase and how many more books fit.
pub fn status(ctx: &Context) -> Result<bool> {
    let cart = ctx.cart(NoticeLog::new())?;
    let report = StatusReport::of(&cart);

    if ctx.output.is_json() {
        ctx.output.json(&report);
        return Ok(true);
    }

    ctx.output.header("Borrowing cart");
    ctx.output.kv("phase", report.phase);
    ctx.output.kv("books", &format!("{}/{}", report.count, report.capacity));
    ctx.output.kv("room for", &format!("{} more", report.remaining));
    Ok(true)
}

/// Show the cart.
pub fn list(ctx: &Context) -> Result<bool> {
    let notices = NoticeLog::new();
    let cart = ctx.cart(notices.clone())?;

    if ctx.output.is_json() {
        report(ctx, &cart, &notices, true);
        return Ok(true);
    }

    ctx.output.header(&format!(
        "Borrowing cart ({}/{})",
        cart.cart_item_count(),
        MAX_CART_ITEMS
    ));
    if cart.is_empty() {
        ctx.output.info("Your cart is empty.");
        ctx.output.info("Run `shelfcart add <id> <title>` to add a book.");
        return Ok(true);
    }
    for (i, entry) in cart.items().iter().enumerate() {
        ctx.output.entry(i + 1, entry);
    }
    if cart.is_full() {
        ctx.output.warn("Cart is full; submit or remove a book to add more.");
    }
    Ok(true)
}

/// Add a book built from command line arguments.
pub fn add(args: AddArgs, ctx: &Context) -> Result<bool> {
    let mut entry = CartEntry::new(args.id, args.title);
    if let Some(author) = args.author {
        entry = entry.with_field("author", author);
    }
    if let Some(category) = args.category {
        entry = entry.with_field("category", category);
    }
    for (key, value) in args.fields {
        entry = entry.with_field(key, value);
    }

    let notices = NoticeLog::new();
    let mut cart = ctx.cart(notices.clone())?;
    let ok = cart.add_to_cart(entry).is_ok();
    report(ctx, &cart, &notices, ok);
    Ok(ok)
}

/// Add a raw catalog item.
pub fn add_json(args: AddJsonArgs, ctx: &Context) -> Result<bool> {
    let notices = NoticeLog::new();
    let mut cart = ctx.cart(notices.clone())?;

    let ok = match serde_json::from_str(&args.item) {
        Ok(value) => cart.add_catalog_item(value).is_ok(),
        Err(e) => {
            notices.notify(Notice::error(format!("Invalid item: not valid JSON ({e})")));
            false
        }
    };
    report(ctx, &cart, &notices, ok);
    Ok(ok)
}

/// Remove a book.
pub fn remove(args: RemoveArgs, ctx: &Context) -> Result<bool> {
    let notices = NoticeLog::new();
    let mut cart = ctx.cart(notices.clone())?;
    cart.remove_from_cart(&BookId::new(args.id));
    report(ctx, &cart, &notices, true);
    Ok(true)
}

/// Empty the cart.
pub fn clear(ctx: &Context) -> Result<bool> {
    let notices = NoticeLog::new();
    let mut cart = ctx.cart(notices.clone())?;
    cart.clear_cart();
    report(ctx, &cart, &notices, true);
    Ok(true)
}

/// Print the notices an operation produced, or the JSON report.
fn report<S: shelfcart_store::KvStore>(
    ctx: &Context,
    cart: &CartManager<S, NoticeLog>,
    notices: &NoticeLog,
    ok: bool,
) {
    let drained = notices.drain();
    if ctx.output.is_json() {
        ctx.output.json(&CartReport {
            ok,
            count: cart.cart_item_count(),
            capacity: MAX_CART_ITEMS,
            phase: cart.phase().as_str(),
            items: cart.items(),
            notices: drained,
        });
        return;
    }
    for notice in &drained {
        ctx.output.notice(notice);
    }
    ctx.output.kv(
        "cart",
        &format!("{}/{} books", cart.cart_item_count(), MAX_CART_ITEMS),
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::CliConfig;
    use crate::output::Output;
    use shelfcart_store::FileStore;

    fn context(dir: &std::path::Path) -> Context {
        Context {
            config: CliConfig::default(),
            output: Output::new(true),
            store: FileStore::open(dir).unwrap(),
        }
    }

    fn add_args(id: &str) -> AddArgs {
        AddArgs {
            id: id.to_string(),
            title: format!("Book {id}"),
            author: None,
            category: None,
            fields: Vec::new(),
        }
    }

    #[test]
    fn test_status_tracks_phase() {
        let dir = tempfile::tempdir().unwrap();
        let ctx = context(dir.path());

        let report = StatusReport::of(&ctx.cart(NoticeLog::new()).unwrap());
        assert_eq!(
            report,
            StatusReport {
                phase: "empty",
                count: 0,
                capacity: 5,
                remaining: 5
            }
        );

        for id in ["1", "2"] {
            assert!(add(add_args(id), &ctx).unwrap());
        }
        let report = StatusReport::of(&ctx.cart(NoticeLog::new()).unwrap());
        assert_eq!((report.phase, report.count, report.remaining), ("partial", 2, 3));
        assert!(status(&ctx).unwrap());
    }

    #[test]
    fn test_refused_add_fails_command() {
        let dir = tempfile::tempdir().unwrap();
        let ctx = context(dir.path());

        assert!(add(add_args("1"), &ctx).unwrap());
        assert!(!add(add_args("1"), &ctx).unwrap());
        for id in ["2", "3", "4", "5"] {
            assert!(add(add_args(id), &ctx).unwrap());
        }
        assert!(!add(add_args("6"), &ctx).unwrap());

        let report = StatusReport::of(&ctx.cart(NoticeLog::new()).unwrap());
        assert_eq!((report.phase, report.remaining), ("full", 0));
        assert!(remove(RemoveArgs { id: "9".to_string() }, &ctx).unwrap());
    }
}
