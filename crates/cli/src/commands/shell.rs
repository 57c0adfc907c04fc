//! Interactive shop shell.
//!
//! One shell is one browsing context: the ephemeral scope (session marker,
//! guest cart) lives as long as the shell, while accounts, user carts, and
//! purchase history persist in the durable store.
//!
//! # Usage
//!
//! ```text
//! > register ana@x.com Ana
//! Password: Secret1!
//! > login ana@x.com
//! Password: Secret1!
//! > add 1 10 Coffee mug
//! > cart
//! > checkout
//! > history
//! ```
//!
//! Passwords are never part of a command line; `register` and `login` ask
//! for them on a line of their own, read straight into a secret.

use std::io::{BufRead, Write};

use clap::{Parser, Subcommand};
use secrecy::{ExposeSecret, SecretString};

use pocket_shop_core::{DisplayName, Email, Price, ProductId};
use pocket_shop_storefront::services::auth::{AuthService, password_error_message};
use pocket_shop_storefront::services::cart::CartService;
use pocket_shop_storefront::services::search::SearchState;
use pocket_shop_storefront::{AppError, ShopState};

#[derive(Parser, Debug)]
#[command(
    name = "shell",
    no_binary_name = true,
    disable_help_flag = true,
    disable_version_flag = true
)]
struct ShellLine {
    #[command(subcommand)]
    command: ShellCommand,
}

#[derive(Subcommand, Debug, PartialEq)]
enum ShellCommand {
    /// Create an account (the password is asked for on the next line)
    Register {
        email: String,
        /// Display name (may contain spaces)
        #[arg(required = true, num_args = 1..)]
        name: Vec<String>,
    },
    /// Log in (the password is asked for on the next line)
    Login { email: String },
    /// End the session and return to the guest cart
    Logout,
    /// Show who is logged in
    Whoami,
    /// Add one unit of a product to the cart
    Add {
        product_id: ProductId,
        price: Price,
        /// Product name (may contain spaces)
        #[arg(required = true, num_args = 1..)]
        name: Vec<String>,
    },
    /// Remove a product from the cart
    Remove { product_id: ProductId },
    /// Set the quantity of a product (0 or less removes it)
    Qty {
        product_id: ProductId,
        #[arg(allow_negative_numbers = true)]
        quantity: i64,
    },
    /// Show the cart and its totals
    Cart,
    /// Empty the cart
    Clear,
    /// Buy everything in the cart
    Checkout,
    /// Show purchase history
    History,
    /// Filter cart and history by product name; no text clears the filter
    Search { query: Vec<String> },
    /// Leave the shell
    #[command(alias = "exit")]
    Quit,
}

#[derive(Debug, PartialEq, Eq)]
enum Flow {
    Continue,
    Quit,
}

/// Run the shell until `quit` or end of input.
///
/// # Errors
///
/// Returns `AppError` if storage fails or the terminal cannot be read or
/// written. Rejected input (bad passwords, unknown commands) is reported in
/// the output and does not end the shell.
pub async fn run<R: BufRead, W: Write>(
    state: &ShopState,
    mut input: R,
    mut out: W,
) -> Result<(), AppError> {
    let mut shell = Shell {
        auth: state.auth(),
        cart: state.cart(),
        search: SearchState::new(),
    };
    shell.cart.init()?;

    writeln!(out, "Pocket Shop. Type `help` for commands.")?;

    let mut line = String::new();
    loop {
        write!(out, "> ")?;
        out.flush()?;

        line.clear();
        if input.read_line(&mut line)? == 0 {
            writeln!(out)?;
            break;
        }

        let words: Vec<&str> = line.split_whitespace().collect();
        if words.is_empty() {
            continue;
        }

        let command = match ShellLine::try_parse_from(words) {
            Ok(parsed) => parsed.command,
            Err(e) => {
                write!(out, "{}", e.render())?;
                continue;
            }
        };

        if shell.execute(command, &mut input, &mut out).await? == Flow::Quit {
            break;
        }
    }

    tracing::debug!("Shell closed");
    Ok(())
}

/// Prompt for a password and read it into a secret.
///
/// Returns `None` at end of input.
fn read_password<R: BufRead, W: Write>(
    input: &mut R,
    out: &mut W,
) -> std::io::Result<Option<SecretString>> {
    write!(out, "Password: ")?;
    out.flush()?;

    let mut buf = String::new();
    if input.read_line(&mut buf)? == 0 {
        return Ok(None);
    }
    let len = buf.trim_end_matches(['\r', '\n']).len();
    buf.truncate(len);
    Ok(Some(SecretString::from(buf)))
}

struct Shell<'a> {
    auth: AuthService<'a>,
    cart: CartService<'a>,
    search: SearchState,
}

impl Shell<'_> {
    async fn execute<R: BufRead, W: Write>(
        &mut self,
        command: ShellCommand,
        input: &mut R,
        out: &mut W,
    ) -> Result<Flow, AppError> {
        match command {
            ShellCommand::Register { email, name } => {
                let Some(password) = read_password(input, out)? else {
                    return Ok(Flow::Quit);
                };
                self.register(&name.join(" "), &email, &password, out).await?;
            }
            ShellCommand::Login { email } => {
                let Some(password) = read_password(input, out)? else {
                    return Ok(Flow::Quit);
                };
                self.login(&email, &password, out).await?;
            }
            ShellCommand::Logout => {
                self.auth.logout()?;
                self.cart.load_cart()?;
                writeln!(out, "Logged out.")?;
            }
            ShellCommand::Whoami => match self.auth.current_session()? {
                Some(session) => writeln!(out, "Logged in as {}.", session.email)?,
                None => writeln!(out, "Browsing as guest.")?,
            },
            ShellCommand::Add {
                product_id,
                price,
                name,
            } => {
                let name = name.join(" ");
                self.cart.add_to_cart(product_id, &name, price)?;
                writeln!(
                    out,
                    "Added {name}. Cart has {} item(s).",
                    self.cart.total_item_count()
                )?;
            }
            ShellCommand::Remove { product_id } => {
                self.cart.remove_from_cart(product_id)?;
                writeln!(out, "Removed product {product_id}.")?;
            }
            ShellCommand::Qty {
                product_id,
                quantity,
            } => {
                self.cart.update_quantity(product_id, quantity)?;
                writeln!(
                    out,
                    "Cart has {} item(s).",
                    self.cart.total_item_count()
                )?;
            }
            ShellCommand::Cart => {
                self.cart.load_cart()?;
                self.show_cart(out)?;
            }
            ShellCommand::Clear => {
                self.cart.clear_cart()?;
                writeln!(out, "Cart cleared.")?;
            }
            ShellCommand::Checkout => self.checkout(out)?,
            ShellCommand::History => self.show_history(out)?,
            ShellCommand::Search { query } => {
                if query.is_empty() {
                    self.search.clear();
                    writeln!(out, "Search cleared.")?;
                } else {
                    self.search.set(query.join(" "));
                    writeln!(out, "Searching for \"{}\".", self.search.query())?;
                }
            }
            ShellCommand::Quit => return Ok(Flow::Quit),
        }
        Ok(Flow::Continue)
    }

    async fn register<W: Write>(
        &self,
        name: &str,
        email: &str,
        password: &SecretString,
        out: &mut W,
    ) -> Result<(), AppError> {
        let mut problems = Vec::new();
        if let Err(e) = DisplayName::parse(name) {
            problems.push(e.to_string());
        }
        if let Err(e) = Email::parse(email) {
            problems.push(e.to_string());
        }
        let password_problem = password_error_message(password.expose_secret());
        if !password_problem.is_empty() {
            problems.push(format!("password: {password_problem}"));
        }

        if !problems.is_empty() {
            for problem in problems {
                writeln!(out, "  - {problem}")?;
            }
            return Ok(());
        }

        if self
            .auth
            .register(name, email, password.expose_secret())
            .await?
        {
            writeln!(out, "Account created for {email}. Log in with `login`.")?;
        } else {
            writeln!(out, "An account with {email} already exists.")?;
        }
        Ok(())
    }

    async fn login<W: Write>(
        &mut self,
        email: &str,
        password: &SecretString,
        out: &mut W,
    ) -> Result<(), AppError> {
        if !self
            .auth
            .verify_credentials(email, password.expose_secret())
            .await?
        {
            writeln!(out, "Invalid email or password.")?;
            return Ok(());
        }

        self.auth.login(email)?;
        self.cart.load_cart()?;
        writeln!(
            out,
            "Logged in as {email}. Cart has {} item(s).",
            self.cart.total_item_count()
        )?;
        Ok(())
    }

    fn checkout<W: Write>(&mut self, out: &mut W) -> Result<(), AppError> {
        if !self.auth.is_authenticated()? {
            writeln!(out, "Log in to check out.")?;
            return Ok(());
        }

        self.cart.load_cart()?;
        if self.cart.items().is_empty() {
            writeln!(out, "Cart is empty.")?;
            return Ok(());
        }

        let totals = self.cart.totals();
        let recorded = self.cart.commit_purchase()?;
        self.cart.clear_cart()?;
        writeln!(
            out,
            "Purchased {} item(s) in {recorded} line(s) for {}.",
            totals.item_count, totals.total
        )?;
        Ok(())
    }

    fn show_cart<W: Write>(&self, out: &mut W) -> Result<(), AppError> {
        if self.cart.items().is_empty() {
            writeln!(out, "Cart is empty.")?;
            return Ok(());
        }

        if !self.search.query().is_empty() {
            writeln!(out, "Matching \"{}\":", self.search.query())?;
        }
        for line in self.search.filter(self.cart.items()) {
            writeln!(
                out,
                "  #{:<4} {:<24} {:>3} x {:>8} = {:>9}",
                line.product_id,
                line.product_name,
                line.quantity,
                line.unit_price,
                line.line_total()
            )?;
        }

        let totals = self.cart.totals();
        writeln!(out, "Subtotal: {:>9}", totals.subtotal)?;
        writeln!(out, "Tax:      {:>9}", totals.tax)?;
        writeln!(out, "Total:    {:>9}", totals.total)?;
        writeln!(out, "Items:    {:>9}", totals.item_count)?;
        Ok(())
    }

    fn show_history<W: Write>(&self, out: &mut W) -> Result<(), AppError> {
        if !self.auth.is_authenticated()? {
            writeln!(out, "Log in to see purchase history.")?;
            return Ok(());
        }

        let records = self.cart.history()?;
        let matching = self.search.filter(&records);
        if matching.is_empty() {
            writeln!(out, "No purchases.")?;
            return Ok(());
        }

        for record in matching {
            writeln!(
                out,
                "  {}  {:<24} {:>3} x {:>8} = {:>9}",
                record.purchase_timestamp.format("%Y-%m-%d %H:%M"),
                record.product_name,
                record.quantity,
                record.unit_price,
                record.line_total()
            )?;
        }
        Ok(())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use pocket_shop_storefront::config::ShopConfig;
    use pocket_shop_storefront::storage::Storage;

    use super::*;

    async fn run_script(state: &ShopState, script: &str) -> String {
        let mut out = Vec::new();
        run(state, script.as_bytes(), &mut out).await.unwrap();
        String::from_utf8(out).unwrap()
    }

    fn state() -> ShopState {
        ShopState::new(ShopConfig::default(), Storage::in_memory())
    }

    #[test]
    fn test_parse_lines() {
        let parsed = ShellLine::try_parse_from(["add", "1", "10.5", "Green", "tea"]).unwrap();
        assert_eq!(
            parsed.command,
            ShellCommand::Add {
                product_id: ProductId::new(1),
                price: Price::from_cents(1050),
                name: vec!["Green".to_owned(), "tea".to_owned()],
            }
        );

        let parsed = ShellLine::try_parse_from(["qty", "1", "-2"]).unwrap();
        assert_eq!(
            parsed.command,
            ShellCommand::Qty {
                product_id: ProductId::new(1),
                quantity: -2
            }
        );

        assert_eq!(
            ShellLine::try_parse_from(["exit"]).unwrap().command,
            ShellCommand::Quit
        );
        assert!(ShellLine::try_parse_from(["add", "x", "1", "Mug"]).is_err());
        assert!(ShellLine::try_parse_from(["fly"]).is_err());
        assert!(ShellLine::try_parse_from(["login", "ana@x.com", "Secret1!"]).is_err());
        assert!(ShellLine::try_parse_from(["add", "1", "1000000000", "Gold"]).is_err());
    }

    #[tokio::test]
    async fn test_registration_feedback() {
        let state = state();
        let out = run_script(
            &state,
            "register ana@x.com Ana\nsecret\n\
             register ana@x.com Ana\nSecret1!\n\
             register ana@x.com Ana Two\nOther2@\n",
        )
        .await;

        assert!(out.contains("password: Must contain 1 uppercase letter"));
        assert!(out.contains("Account created for ana@x.com."));
        assert!(out.contains("An account with ana@x.com already exists."));
        assert_eq!(state.auth().users().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_shopping_session() {
        let state = state();
        let out = run_script(
            &state,
            "register ana@x.com Ana\nSecret1!\n\
             login ana@x.com\nwrong\n\
             login ana@x.com\nSecret1!\n\
             add 1 10 Mug\n\
             add 1 10 Mug\n\
             cart\n\
             checkout\n\
             history\n\
             quit\n\
             whoami\n",
        )
        .await;

        assert!(out.contains("Invalid email or password."));
        assert!(out.contains("Logged in as ana@x.com."));
        assert!(out.contains("Subtotal:     20.00"));
        assert!(out.contains("Tax:           1.40"));
        assert!(out.contains("Total:        21.40"));
        assert!(out.contains("Purchased 2 item(s) in 1 line(s) for 21.40."));
        assert!(out.contains("Mug"));
        assert!(!out.contains("Secret1!"));
        // quit stops before whoami
        assert!(!out.contains("Browsing as guest."));
    }

    #[tokio::test]
    async fn test_guest_cannot_check_out() {
        let state = state();
        let out = run_script(
            &state,
            "whoami\nadd 2 3.50 Tea\ncheckout\nhistory\n",
        )
        .await;

        assert!(out.contains("Browsing as guest."));
        assert!(out.contains("Log in to check out."));
        assert!(out.contains("Log in to see purchase history."));
    }

    #[tokio::test]
    async fn test_search_filters_cart() {
        let state = state();
        let out = run_script(
            &state,
            "add 1 10 Coffee mug\nadd 2 3.50 Green tea\nsearch TEA\ncart\n",
        )
        .await;

        assert!(out.contains("Matching \"TEA\":"));
        assert!(out.contains("Green tea"));
        assert!(!out.contains("#1 "));
    }

    #[tokio::test]
    async fn test_unknown_command_keeps_shell_open() {
        let state = state();
        let out = run_script(&state, "fly\nwhoami\n").await;
        assert!(out.contains("Browsing as guest."));
    }

    #[tokio::test]
    async fn test_password_prompt_at_end_of_input() {
        let state = state();
        let out = run_script(&state, "register ana@x.com Ana\n").await;
        assert!(out.ends_with("Password: "));
        assert!(state.auth().users().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_oversized_price_is_rejected() {
        let state = state();
        let out = run_script(
            &state,
            "add 1 40000000000000000000000000000 Gold\nadd 1 0.125 Gold\ncart\n",
        )
        .await;

        assert!(out.contains("price cannot exceed 999999999.99"));
        assert!(out.contains("price cannot have more than 2 decimal places"));
        assert!(out.contains("Cart is empty."));
    }
}
