//! Borrow request commands.

use anyhow::Result;
use shelfcart::prelude::*;

use super::{RequestArgs, RequestsArgs, SubmitArgs};
use crate::context::Context;
use crate::output::status_badge;

/// Submit the cart as a borrow request.
pub fn submit(args: SubmitArgs, ctx: &Context) -> Result<bool> {
    let notices = NoticeLog::new();
    let mut cart = ctx.cart(notices.clone())?;
    let mut ledger = ctx.ledger();

    let result = submit_cart(&mut cart, &mut ledger, args.note);
    let drained = notices.drain();

    if ctx.output.is_json() {
        let request = match &result {
            Ok(id) => ledger.get(id)?,
            Err(_) => None,
        };
        ctx.output.json(&serde_json::json!({
            "ok": result.is_ok(),
            "request": request,
            "notices": drained,
        }));
    } else {
        for notice in &drained {
            ctx.output.notice(notice);
        }
    }
    Ok(result.is_ok())
}

/// List submitted requests.
pub fn list(args: RequestsArgs, ctx: &Context) -> Result<bool> {
    let ledger = ctx.ledger();
    let requests = match args.status {
        Some(status) => ledger.with_status(status.into())?,
        None => ledger.list()?,
    };

    if ctx.output.is_json() {
        ctx.output.json(&requests);
        return Ok(true);
    }

    ctx.output.header("Borrow requests");
    if requests.is_empty() {
        ctx.output.info("No borrow requests found.");
        return Ok(true);
    }
    for request in &requests {
        println!(
            "  {}  {}  {}  {} book(s)",
            console::style(request.id.as_str()).bold(),
            status_badge(request.status),
            request.created_at.format("%Y-%m-%d %H:%M"),
            request.book_count()
        );
        if let Some(note) = &request.note {
            ctx.output.kv("note", note);
        }
    }
    Ok(true)
}

/// Move a request through its lifecycle.
pub fn update(args: RequestArgs, ctx: &Context) -> Result<bool> {
    let ledger = ctx.ledger();
    let target = args.action.target();

    match ledger.update_status(&RequestId::new(args.id), target) {
        Ok(request) => {
            if ctx.output.is_json() {
                ctx.output.json(&request);
            } else {
                ctx.output.success(&format!(
                    "Request {} is now {}",
                    request.id,
                    request.status.label()
                ));
            }
            Ok(true)
        }
        Err(e) => {
            ctx.output.error(&e.to_string());
            Ok(false)
        }
    }
}
