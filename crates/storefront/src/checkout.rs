//! Order text formatting for the checkout hand-off.

use shop_core::Cart;

/// Format the current cart as a human-readable order message.
///
/// Pure over the cart: the total is computed here, at hand-off time, never
/// cached. Lines carry quantity and description only; prices stay out of
/// the outbound message.
pub fn format_order(cart: &Cart) -> String {
    let mut message = String::from("*🛒 COMMANDE DE PROVISIONS - PROVIZ-YON*\n\n");

    for item in cart.items() {
        message.push_str(&format!(
            "▪️ {}x {}\n",
            item.quantity, item.product.description
        ));
    }

    message.push_str(&format!(
        "\n*TOTAL ESTIMÉ: {} HTG*\n",
        format_htg(cart.total())
    ));
    message.push_str("_Merci de confirmer la disponibilité et la livraison._");
    message
}

/// Group the amount in thousands the French way, with a narrow no-break
/// space as the separator.
fn format_htg(amount: u64) -> String {
    let digits = amount.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push('\u{202F}');
        }
        out.push(c);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use shop_core::{demo_catalog, Product};

    #[test]
    fn test_format_order_lines_and_total() {
        let catalog = demo_catalog();
        let mut cart = Cart::new();
        cart.add(catalog[0].clone(), 2); // Riz, 3500
        cart.add(catalog[2].clone(), 3); // Spaghetti, 85

        let text = format_order(&cart);

        assert!(text.starts_with("*🛒 COMMANDE DE PROVISIONS - PROVIZ-YON*\n\n"));
        assert!(text.contains("▪️ 2x Sac Riz Mega (25kg)\n"));
        assert!(text.contains("▪️ 3x Spaghetti Bongu (Paquet)\n"));
        // 7255 groups as 7 255
        assert!(text.contains("*TOTAL ESTIMÉ: 7\u{202F}255 HTG*"));
        assert!(text.ends_with("_Merci de confirmer la disponibilité et la livraison._"));
    }

    #[test]
    fn test_format_order_special_request_line() {
        let mut cart = Cart::new();
        cart.add(Product::special_request("sp-1", "Avocat"), 2);

        let text = format_order(&cart);

        assert!(text.contains("▪️ 2x Commande Spéciale: Avocat\n"));
        assert!(text.contains("*TOTAL ESTIMÉ: 0 HTG*"));
    }

    #[test]
    fn test_format_order_total_reflects_current_cart() {
        let catalog = demo_catalog();
        let mut cart = Cart::new();
        cart.add(catalog[1].clone(), 1); // Huile, 1200

        let before = format_order(&cart);
        assert!(before.contains("*TOTAL ESTIMÉ: 1\u{202F}200 HTG*"));

        cart.update_quantity(&catalog[1].id, 2);
        let after = format_order(&cart);
        assert!(after.contains("*TOTAL ESTIMÉ: 3\u{202F}600 HTG*"));
    }

    #[test]
    fn test_format_htg_grouping() {
        assert_eq!(format_htg(0), "0");
        assert_eq!(format_htg(850), "850");
        assert_eq!(format_htg(7000), "7\u{202F}000");
        assert_eq!(format_htg(1234567), "1\u{202F}234\u{202F}567");
    }
}
