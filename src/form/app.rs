use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::models::{OrderConfirmation, OrderType, RawOrderInput, Side};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    Symbol,
    Side,
    OrderType,
    Quantity,
    Price,
}

#[derive(Debug, Clone, PartialEq)]
pub enum FormStatus {
    Idle,
    Submitting,
    Placed(OrderConfirmation),
    Failed,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormAction {
    None,
    Submit,
    Quit,
}

pub struct FormApp {
    pub symbol: String,
    pub side: Side,
    pub order_type: OrderType,
    pub quantity: String,
    pub price: String,
    pub focus: Field,
    pub status: FormStatus,
}

impl Default for FormApp {
    fn default() -> Self {
        Self::new()
    }
}

impl FormApp {
    pub fn new() -> Self {
        Self {
            symbol: "BTCUSDT".to_string(),
            side: Side::Buy,
            order_type: OrderType::Market,
            quantity: "0.001".to_string(),
            price: String::new(),
            focus: Field::Symbol,
            status: FormStatus::Idle,
        }
    }

    /// Label for the conditional price field, `None` when the order type has no price.
    pub fn price_label(&self) -> Option<&'static str> {
        match self.order_type {
            OrderType::Market => None,
            OrderType::Limit => Some("Limit Price (e.g., 30000)"),
            OrderType::StopMarket => Some("Stop Price (e.g., 28000)"),
        }
    }

    pub fn visible_fields(&self) -> Vec<Field> {
        let mut fields = vec![Field::Symbol, Field::Side, Field::OrderType, Field::Quantity];
        if self.price_label().is_some() {
            fields.push(Field::Price);
        }
        fields
    }

    pub fn handle_key(&mut self, key: KeyEvent) -> FormAction {
        if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
            return FormAction::Quit;
        }

        match key.code {
            KeyCode::Esc => return FormAction::Quit,
            KeyCode::Enter => return FormAction::Submit,
            KeyCode::Tab | KeyCode::Down => self.focus_next(),
            KeyCode::BackTab | KeyCode::Up => self.focus_prev(),
            KeyCode::Left => self.cycle(false),
            KeyCode::Right => self.cycle(true),
            KeyCode::Backspace => {
                if let Some(text) = self.focused_text() {
                    text.pop();
                }
            }
            KeyCode::Char(c) => self.enter_char(c),
            _ => {}
        }
        FormAction::None
    }

    fn enter_char(&mut self, c: char) {
        match self.focus {
            Field::Symbol => {
                if c.is_ascii_alphanumeric() {
                    self.symbol.push(c.to_ascii_uppercase());
                }
            }
            Field::Quantity | Field::Price => {
                if c.is_ascii_digit() || c == '.' {
                    if let Some(text) = self.focused_text() {
                        text.push(c);
                    }
                }
            }
            Field::Side | Field::OrderType => {
                if c == ' ' {
                    self.cycle(true);
                }
            }
        }
    }

    fn focused_text(&mut self) -> Option<&mut String> {
        match self.focus {
            Field::Symbol => Some(&mut self.symbol),
            Field::Quantity => Some(&mut self.quantity),
            Field::Price => Some(&mut self.price),
            Field::Side | Field::OrderType => None,
        }
    }

    fn focus_next(&mut self) {
        let fields = self.visible_fields();
        let idx = fields.iter().position(|f| *f == self.focus).unwrap_or(0);
        self.focus = fields[(idx + 1) % fields.len()];
    }

    fn focus_prev(&mut self) {
        let fields = self.visible_fields();
        let idx = fields.iter().position(|f| *f == self.focus).unwrap_or(0);
        self.focus = fields[(idx + fields.len() - 1) % fields.len()];
    }

    fn cycle(&mut self, forward: bool) {
        match self.focus {
            Field::Side => self.side = step(&Side::ALL, self.side, forward),
            Field::OrderType => {
                self.order_type = step(&OrderType::ALL, self.order_type, forward);
                self.price.clear();
            }
            _ => {}
        }
    }

    pub fn to_raw_input(&self) -> RawOrderInput {
        let (price, stop_price) = match self.order_type {
            OrderType::Market => (None, None),
            OrderType::Limit => (Some(self.price.clone()), None),
            OrderType::StopMarket => (None, Some(self.price.clone())),
        };

        RawOrderInput {
            symbol: self.symbol.clone(),
            side: self.side.as_str().to_string(),
            order_type: self.order_type.as_str().to_string(),
            quantity: self.quantity.clone(),
            price,
            stop_price,
        }
    }

    pub fn begin_submit(&mut self) {
        self.status = FormStatus::Submitting;
    }

    pub fn finish_submit(&mut self, outcome: Option<OrderConfirmation>) {
        self.status = match outcome {
            Some(confirmation) => FormStatus::Placed(confirmation),
            None => FormStatus::Failed,
        };
    }
}

fn step<T: Copy + PartialEq>(all: &[T], current: T, forward: bool) -> T {
    let idx = all.iter().position(|v| *v == current).unwrap_or(0);
    let next = if forward {
        (idx + 1) % all.len()
    } else {
        (idx + all.len() - 1) % all.len()
    };
    all[next]
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    fn press(app: &mut FormApp, code: KeyCode) -> FormAction {
        app.handle_key(KeyEvent::new(code, KeyModifiers::NONE))
    }

    fn type_text(app: &mut FormApp, text: &str) {
        for c in text.chars() {
            press(app, KeyCode::Char(c));
        }
    }

    #[test]
    fn market_form_has_no_price_field() {
        let mut app = FormApp::new();
        assert_eq!(app.price_label(), None);
        for _ in 0..3 {
            press(&mut app, KeyCode::Tab);
        }
        assert_eq!(app.focus, Field::Quantity);
        press(&mut app, KeyCode::Tab);
        assert_eq!(app.focus, Field::Symbol);
    }

    #[test]
    fn limit_form_collects_price_only() {
        let mut app = FormApp::new();
        press(&mut app, KeyCode::Tab);
        press(&mut app, KeyCode::Right);
        assert_eq!(app.side, Side::Sell);

        press(&mut app, KeyCode::Tab);
        press(&mut app, KeyCode::Right);
        assert_eq!(app.order_type, OrderType::Limit);

        press(&mut app, KeyCode::Tab);
        for _ in 0..5 {
            press(&mut app, KeyCode::Backspace);
        }
        type_text(&mut app, "0.01");

        press(&mut app, KeyCode::Tab);
        assert_eq!(app.focus, Field::Price);
        type_text(&mut app, "30000x");

        let raw = app.to_raw_input();
        assert_eq!(raw.side, "SELL");
        assert_eq!(raw.order_type, "LIMIT");
        assert_eq!(raw.quantity, "0.01");
        assert_eq!(raw.price.as_deref(), Some("30000"));
        assert_eq!(raw.stop_price, None);
    }

    #[test]
    fn stop_market_form_maps_price_to_stop_price() {
        let mut app = FormApp::new();
        app.order_type = OrderType::StopMarket;
        app.focus = Field::Price;
        type_text(&mut app, "28000");

        let raw = app.to_raw_input();
        assert_eq!(raw.price, None);
        assert_eq!(raw.stop_price.as_deref(), Some("28000"));
    }

    #[test]
    fn switching_type_clears_stale_price() {
        let mut app = FormApp::new();
        app.order_type = OrderType::Limit;
        app.price = "30000".to_string();
        app.focus = Field::OrderType;
        press(&mut app, KeyCode::Right);
        assert_eq!(app.order_type, OrderType::StopMarket);
        assert!(app.price.is_empty());
    }

    #[test]
    fn symbol_is_uppercased_as_typed() {
        let mut app = FormApp::new();
        app.symbol.clear();
        type_text(&mut app, "ethusdt");
        assert_eq!(app.symbol, "ETHUSDT");
    }

    #[test]
    fn enter_submits_and_escape_quits() {
        let mut app = FormApp::new();
        assert_eq!(press(&mut app, KeyCode::Enter), FormAction::Submit);
        assert_eq!(press(&mut app, KeyCode::Esc), FormAction::Quit);
    }

    #[test]
    fn submit_outcome_sets_status() {
        let mut app = FormApp::new();
        app.begin_submit();
        assert_eq!(app.status, FormStatus::Submitting);

        app.finish_submit(None);
        assert_eq!(app.status, FormStatus::Failed);

        let confirmation = OrderConfirmation(json!({"orderId": 7, "status": "NEW"}));
        app.finish_submit(Some(confirmation.clone()));
        assert_eq!(app.status, FormStatus::Placed(confirmation));
    }
}
