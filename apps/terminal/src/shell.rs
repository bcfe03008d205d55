//! # Shell
//!
//! Tokenizes and dispatches command lines. The grammar is one screen per
//! top-level word:
//!
//! ```text
//! help                                       this text
//! login <username> <password>                authenticate
//! logout | whoami                            session
//! register <user> <pass> <name> [role]       create an account
//! products [term|-] [page]                   product list screen
//! product add <name> <price> <stock> [category=ID] [barcode=C] [image=PATH]
//! product edit <id> <name> <price> <stock> [options...]
//! product rm <id>...
//! categories [term|-] [page]                 category list screen
//! category add <name> [description=TEXT] [image=PATH]
//! category edit <id> <name> [options...]
//! category rm <id>...
//! cart [add <id|barcode> | inc <id> [n] | dec <id> [n] | rm <id> | clear]
//! checkout                                   submit the cart as a sale
//! receipts [term|-] [page]                   receipts list screen
//! receipt <id>                               receipt detail
//! receipt rm <id>...
//! dashboard                                  today's stats, trend, top sellers
//! quit | exit
//! ```
//!
//! Double quotes group words (`product add "Coca-Cola 330ml" 1200 24`);
//! `key=value` tokens are options, everything else is positional.

use crate::commands;
use crate::commands::category::CategoryFormArgs;
use crate::commands::product::ProductFormArgs;
use crate::error::AppError;
use crate::Ctx;

/// Whether the loop keeps running after a command.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShellFlow {
    Continue,
    Quit,
}

// =============================================================================
// Tokenizer
// =============================================================================

/// Splits a command line into tokens, honoring double quotes.
pub fn tokenize(line: &str) -> Vec<String> {
    let mut tokens = Vec::new();
    let mut current = String::new();
    let mut in_quotes = false;

    for c in line.chars() {
        match c {
            '"' => in_quotes = !in_quotes,
            c if c.is_whitespace() && !in_quotes => {
                if !current.is_empty() {
                    tokens.push(std::mem::take(&mut current));
                }
            }
            c => current.push(c),
        }
    }
    if !current.is_empty() {
        tokens.push(current);
    }

    tokens
}

/// Splits tokens into positionals and `key=value` options.
fn split_args(tokens: &[String]) -> (Vec<String>, Vec<(String, String)>) {
    let mut positional = Vec::new();
    let mut options = Vec::new();

    for token in tokens {
        match token.split_once('=') {
            Some((key, value)) if !key.is_empty() && key.chars().all(char::is_alphabetic) => {
                options.push((key.to_string(), value.to_string()));
            }
            _ => positional.push(token.clone()),
        }
    }

    (positional, options)
}

fn take_option(options: &[(String, String)], key: &str) -> Option<String> {
    options
        .iter()
        .find(|(k, _)| k == key)
        .map(|(_, v)| v.clone())
}

fn check_known_options(options: &[(String, String)], known: &[&str]) -> Result<(), AppError> {
    for (key, _) in options {
        if !known.contains(&key.as_str()) {
            return Err(AppError::usage(format!(
                "Unknown option `{}` (expected one of: {})",
                key,
                known.join(", ")
            )));
        }
    }
    Ok(())
}

fn parse_amount(field: &str, raw: &str) -> Result<i64, AppError> {
    raw.parse::<i64>()
        .map_err(|_| AppError::usage(format!("{} must be a whole number, got `{}`", field, raw)))
}

/// Parses `[term|-] [page]` for the list screens. `-` means "no filter".
fn parse_list_args(args: &[String]) -> Result<(String, usize), AppError> {
    let term = match args.first().map(String::as_str) {
        None | Some("-") => String::new(),
        Some(term) => term.to_string(),
    };
    let page = match args.get(1) {
        None => 1,
        Some(raw) => raw
            .parse::<usize>()
            .map_err(|_| AppError::usage(format!("page must be a number, got `{}`", raw)))?,
    };
    Ok((term, page))
}

fn parse_product_form(
    positional: &[String],
    options: &[(String, String)],
) -> Result<ProductFormArgs, AppError> {
    let [name, price, stock] = positional else {
        return Err(AppError::usage(
            "usage: product add|edit ... <name> <price> <stock> [category=ID] [barcode=CODE] [image=PATH]",
        ));
    };
    check_known_options(options, &["category", "barcode", "image"])?;

    Ok(ProductFormArgs {
        name: name.clone(),
        price: parse_amount("price", price)?,
        stock: parse_amount("stock", stock)?,
        category: take_option(options, "category"),
        barcode: take_option(options, "barcode"),
        image: take_option(options, "image"),
    })
}

fn parse_category_form(
    positional: &[String],
    options: &[(String, String)],
) -> Result<CategoryFormArgs, AppError> {
    let [name] = positional else {
        return Err(AppError::usage(
            "usage: category add|edit ... <name> [description=TEXT] [image=PATH]",
        ));
    };
    check_known_options(options, &["description", "image"])?;

    Ok(CategoryFormArgs {
        name: name.clone(),
        description: take_option(options, "description"),
        image: take_option(options, "image"),
    })
}

// =============================================================================
// Dispatcher
// =============================================================================

/// Executes one command line against the shared context.
pub async fn dispatch(ctx: &Ctx, line: &str) -> Result<ShellFlow, AppError> {
    let tokens = tokenize(line);
    let Some(command) = tokens.first().map(String::as_str) else {
        return Ok(ShellFlow::Continue);
    };
    let rest = &tokens[1..];

    match command {
        "help" => {
            print_help();
        }
        "quit" | "exit" => return Ok(ShellFlow::Quit),

        // ---------------------------------------------------------------------
        // Session
        // ---------------------------------------------------------------------
        "login" => match rest {
            [username, password] => commands::auth::login(ctx, username, password).await?,
            _ => return Err(AppError::usage("usage: login <username> <password>")),
        },
        "logout" => commands::auth::logout(ctx)?,
        "whoami" => commands::auth::whoami(ctx)?,
        "register" => match rest {
            [username, password, name] => {
                commands::auth::register(ctx, username, password, name, None).await?
            }
            [username, password, name, role] => {
                commands::auth::register(ctx, username, password, name, Some(role)).await?
            }
            _ => {
                return Err(AppError::usage(
                    "usage: register <username> <password> <name> [admin|manager|staff]",
                ))
            }
        },

        // ---------------------------------------------------------------------
        // Products
        // ---------------------------------------------------------------------
        "products" => {
            let (term, page) = parse_list_args(rest)?;
            commands::product::list(ctx, &term, page).await?;
        }
        "product" => match rest {
            [sub, args @ ..] if sub == "add" => {
                let (positional, options) = split_args(args);
                commands::product::add(ctx, parse_product_form(&positional, &options)?).await?;
            }
            [sub, id, args @ ..] if sub == "edit" => {
                let (positional, options) = split_args(args);
                commands::product::edit(ctx, id, parse_product_form(&positional, &options)?)
                    .await?;
            }
            [sub, ids @ ..] if sub == "rm" && !ids.is_empty() => {
                commands::product::remove(ctx, ids).await?;
            }
            _ => return Err(AppError::usage("usage: product add|edit|rm ... (see help)")),
        },

        // ---------------------------------------------------------------------
        // Categories
        // ---------------------------------------------------------------------
        "categories" => {
            let (term, page) = parse_list_args(rest)?;
            commands::category::list(ctx, &term, page).await?;
        }
        "category" => match rest {
            [sub, args @ ..] if sub == "add" => {
                let (positional, options) = split_args(args);
                commands::category::add(ctx, parse_category_form(&positional, &options)?).await?;
            }
            [sub, id, args @ ..] if sub == "edit" => {
                let (positional, options) = split_args(args);
                commands::category::edit(ctx, id, parse_category_form(&positional, &options)?)
                    .await?;
            }
            [sub, ids @ ..] if sub == "rm" && !ids.is_empty() => {
                commands::category::remove(ctx, ids).await?;
            }
            _ => return Err(AppError::usage("usage: category add|edit|rm ... (see help)")),
        },

        // ---------------------------------------------------------------------
        // Sale screen
        // ---------------------------------------------------------------------
        "cart" => match rest {
            [] => commands::cart::show(ctx)?,
            [sub, key] if sub == "add" => commands::cart::add(ctx, key).await?,
            [sub, id] if sub == "inc" => commands::cart::update(ctx, id, 1)?,
            [sub, id, n] if sub == "inc" => {
                commands::cart::update(ctx, id, parse_amount("count", n)?)?
            }
            [sub, id] if sub == "dec" => commands::cart::update(ctx, id, -1)?,
            [sub, id, n] if sub == "dec" => {
                commands::cart::update(ctx, id, -parse_amount("count", n)?)?
            }
            [sub, id] if sub == "rm" => commands::cart::remove(ctx, id)?,
            [sub] if sub == "clear" => commands::cart::clear(ctx)?,
            _ => {
                return Err(AppError::usage(
                    "usage: cart [add <id>|inc <id> [n]|dec <id> [n]|rm <id>|clear]",
                ))
            }
        },
        "checkout" => commands::sale::checkout(ctx).await?,

        // ---------------------------------------------------------------------
        // Receipts & dashboard
        // ---------------------------------------------------------------------
        "receipts" => {
            let (term, page) = parse_list_args(rest)?;
            commands::sale::list(ctx, &term, page).await?;
        }
        "receipt" => match rest {
            [sub, ids @ ..] if sub == "rm" && !ids.is_empty() => {
                commands::sale::remove(ctx, ids).await?;
            }
            [id] => commands::sale::detail(ctx, id).await?,
            _ => return Err(AppError::usage("usage: receipt <id> | receipt rm <id>...")),
        },
        "dashboard" => commands::stats::dashboard(ctx).await?,

        unknown => {
            return Err(AppError::usage(format!(
                "Unknown command `{}` - try `help`",
                unknown
            )))
        }
    }

    Ok(ShellFlow::Continue)
}

fn print_help() {
    println!("Commands:");
    println!("  login <username> <password>       authenticate");
    println!("  logout / whoami                   session");
    println!("  register <user> <pass> <name> [role]");
    println!("  products [term|-] [page]          product list");
    println!("  product add <name> <price> <stock> [category=ID] [barcode=C] [image=PATH]");
    println!("  product edit <id> <name> <price> <stock> [options]");
    println!("  product rm <id>...                delete (many ids fan out)");
    println!("  categories [term|-] [page]        category list");
    println!("  category add <name> [description=TEXT] [image=PATH]");
    println!("  category edit <id> <name> [options]");
    println!("  category rm <id>...");
    println!("  cart                              show the current order");
    println!("  cart add <id|barcode>             add one unit");
    println!("  cart inc|dec <id> [n]             adjust quantity");
    println!("  cart rm <id> / cart clear");
    println!("  checkout                          submit the sale");
    println!("  receipts [term|-] [page]          receipts list");
    println!("  receipt <id> / receipt rm <id>...");
    println!("  dashboard                         today's stats & trend");
    println!("  quit");
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tokenize_respects_quotes() {
        assert_eq!(
            tokenize(r#"product add "Coca-Cola 330ml" 1200 24"#),
            vec!["product", "add", "Coca-Cola 330ml", "1200", "24"]
        );
        assert_eq!(tokenize("   "), Vec::<String>::new());
        assert_eq!(tokenize("cart"), vec!["cart"]);
    }

    #[test]
    fn test_split_args_separates_options() {
        let tokens: Vec<String> = ["Noodles", "800", "10", "barcode=123", "category=c-1"]
            .iter()
            .map(|s| s.to_string())
            .collect();

        let (positional, options) = split_args(&tokens);
        assert_eq!(positional, vec!["Noodles", "800", "10"]);
        assert_eq!(options.len(), 2);
        assert_eq!(take_option(&options, "barcode").unwrap(), "123");
        assert!(take_option(&options, "image").is_none());
    }

    #[test]
    fn test_split_args_keeps_equals_in_values() {
        // A value containing '=' stays intact after the first split.
        let tokens = vec!["description=a=b".to_string()];
        let (_, options) = split_args(&tokens);
        assert_eq!(take_option(&options, "description").unwrap(), "a=b");
    }

    #[test]
    fn test_parse_list_args() {
        assert_eq!(parse_list_args(&[]).unwrap(), (String::new(), 1));
        assert_eq!(
            parse_list_args(&["coke".to_string()]).unwrap(),
            ("coke".to_string(), 1)
        );
        assert_eq!(
            parse_list_args(&["-".to_string(), "3".to_string()]).unwrap(),
            (String::new(), 3)
        );
        assert!(parse_list_args(&["coke".to_string(), "x".to_string()]).is_err());
    }

    #[test]
    fn test_parse_product_form_rejects_unknown_option() {
        let positional: Vec<String> = ["Noodles", "800", "10"]
            .iter()
            .map(|s| s.to_string())
            .collect();
        let options = vec![("color".to_string(), "red".to_string())];

        let err = parse_product_form(&positional, &options).unwrap_err();
        assert!(err.message.contains("Unknown option"));
    }

    #[test]
    fn test_parse_product_form_rejects_non_numeric_price() {
        let positional: Vec<String> = ["Noodles", "cheap", "10"]
            .iter()
            .map(|s| s.to_string())
            .collect();

        let err = parse_product_form(&positional, &[]).unwrap_err();
        assert!(err.message.contains("price"));
    }
}
