//! Coin-acceptor LED addon
//!
//! Drives per-player start and coin LEDs, a marquee LED and two external
//! outputs mirroring the start/coin buttons.

use crate::schema::{Addon, FieldDescriptor};

/// Addon id
pub const COIN_LEDS: &str = "coin-leds";
/// Gate field
pub const COIN_LEDS_GATE: &str = "CoinLedsAddonEnabled";

/// Players with their own start/coin LED pair
const PLAYERS: usize = 4;

pub fn coin_leds() -> Addon {
    let gate = COIN_LEDS_GATE;
    let mut fields = vec![FieldDescriptor::gate(gate, "Coin Leds Add-On Enabled")];

    for player in 1..=PLAYERS {
        fields.push(FieldDescriptor::pin(
            format!("coinLedsStartPin{}", player),
            format!("Start P{} LED Pin", player),
            gate,
        ));
    }
    for player in 1..=PLAYERS {
        fields.push(FieldDescriptor::pin(
            format!("coinLedsCoinPin{}", player),
            format!("Coin P{} LED Pin", player),
            gate,
        ));
    }

    fields.extend([
        FieldDescriptor::pin("coinLedsMarqueePin", "Marquee LED Pin", gate),
        FieldDescriptor::pin("coinLedsExtStartPin", "External Start Pin", gate),
        FieldDescriptor::pin("coinLedsExtCoinPin", "External Coin Pin", gate),
        FieldDescriptor::brightness("coinLedsStartBrightness", "Start LED Brightness", gate),
        FieldDescriptor::brightness("coinLedsCoinBrightness", "Coin LED Brightness", gate),
        FieldDescriptor::brightness("coinLedsMarqueeBrightness", "Marquee LED Brightness", gate),
    ]);

    Addon::new(COIN_LEDS, "Coin LEDs", gate, fields)
}
