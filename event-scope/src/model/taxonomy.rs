use ratatui::style::Color;

/// One countable event kind: the bar it is drawn as and the substring that
/// marks a log line as belonging to it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Category {
    pub label: &'static str,
    pub needle: &'static str,
    pub color: Color,
}

const fn category(label: &'static str, needle: &'static str, color: Color) -> Category {
    Category {
        label,
        needle,
        color,
    }
}

const GREEN: Color = Color::Rgb(0x5c, 0xb8, 0x5c);
const RED: Color = Color::Rgb(0xd9, 0x53, 0x4f);
const PURPLE: Color = Color::Rgb(0x66, 0x33, 0x99);
const ORANGE: Color = Color::Rgb(0xf0, 0xad, 0x4e);
const AMBER: Color = Color::Rgb(0xc8, 0x7f, 0x0a);
const BLUE: Color = Color::Rgb(0x33, 0x7a, 0xb7);
const TEAL: Color = Color::Rgb(0x5b, 0xc0, 0xde);

const DEFAULT: &[Category] = &[
    category("Packets Sent", "Sent", GREEN),
    category("Packets Received", "Received", RED),
    category("Failed to Receive ACK", "Failed to receive ACK", PURPLE),
];

const PROXY: &[Category] = &[
    category("Packets Sent", "Sent", GREEN),
    category("Packets Received", "Received", RED),
    category("Client→Server Delayed", "Delayed Client to Server", ORANGE),
    category("Server→Client Delayed", "Delayed Server to Client", AMBER),
    category("Client→Server Dropped", "Dropped Client to Server", BLUE),
    category("Server→Client Dropped", "Dropped Server to Client", TEAL),
];

const COMBINED: &[Category] = &[
    category("Packets Sent", "Sent", GREEN),
    category("Packets Received", "Received", RED),
    category("Fails to Receive ACK", "Failed to receive ACK", PURPLE),
    category("Proxy Delayed", "Delayed", ORANGE),
    category("Proxy Dropped", "Dropped", BLUE),
];

/// A fixed, ordered category set. Order is both bar order and match
/// priority.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Ruleset {
    Default,
    Proxy,
    Combined,
}

impl Ruleset {
    pub fn categories(self) -> &'static [Category] {
        match self {
            Ruleset::Default => DEFAULT,
            Ruleset::Proxy => PROXY,
            Ruleset::Combined => COMBINED,
        }
    }

    pub fn len(self) -> usize {
        self.categories().len()
    }

    pub fn name(self) -> &'static str {
        match self {
            Ruleset::Default => "default",
            Ruleset::Proxy => "proxy",
            Ruleset::Combined => "combined",
        }
    }

    /// Index of the first category whose needle occurs in `line`.
    /// Matching is exact-case.
    pub fn classify(self, line: &str) -> Option<usize> {
        self.categories()
            .iter()
            .position(|c| line.contains(c.needle))
    }
}
