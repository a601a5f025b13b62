use crate::config::SplitConfig;
use crate::error::SplitError;
use crate::format::{CurrencyFormat, CurrencyFormatter};
use crate::types::*;
use std::ops::RangeInclusive;
use tracing::{debug, trace};

pub type SubscriptionId = u64;

type Subscriber = Box<dyn FnMut(&BillResult)>;

/// Observable input state for the split screen
/// - Owns the only mutable copy of the `BillInput`
/// - Clamps edits so the calculator never sees an empty party
/// - Recomputes and pushes a fresh `BillResult` to subscribers on every change
pub struct SplitStore {
    input: BillInput,

    /// Tip choices offered to the user, in display order
    tip_options: Vec<TipPercentage>,

    /// Selectable party sizes; the lower bound is always at least 1
    party_sizes: RangeInclusive<PartySize>,

    formatter: Box<dyn CurrencyFormatter>,

    /// Subscribers in subscription order
    subscribers: Vec<(SubscriptionId, Subscriber)>,
    next_subscription: SubscriptionId,

    amount_focused: bool,
}

impl SplitStore {
    /// Store showing totals in the configured locale, or in
    /// `currency_code` when that locale uses another currency.
    pub fn new(config: SplitConfig) -> Self {
        let mut currency = CurrencyFormat::from_locale(&config.locale);
        if !currency.code.eq_ignore_ascii_case(&config.currency_code) {
            currency = CurrencyFormat::from_code(&config.currency_code);
        }
        Self::with_formatter(config, Box::new(currency))
    }

    pub fn with_formatter(config: SplitConfig, formatter: Box<dyn CurrencyFormatter>) -> Self {
        let min = config.min_party_size.max(1);
        let max = config.max_party_size.max(min);

        let mut input = config.initial_input();
        input.party_size = input.party_size.clamp(min, max);

        Self {
            input,
            tip_options: config.tip_options,
            party_sizes: min..=max,
            formatter,
            subscribers: Vec::new(),
            next_subscription: 1,
            amount_focused: false,
        }
    }

    pub fn input(&self) -> BillInput {
        self.input
    }

    /// Current totals, recomputed from the input on every call
    pub fn result(&self) -> Result<BillResult, SplitError> {
        self.input.result()
    }

    pub fn tip_options(&self) -> &[TipPercentage] {
        &self.tip_options
    }

    pub fn party_sizes(&self) -> RangeInclusive<PartySize> {
        self.party_sizes.clone()
    }

    /// Set the pre-tip amount. Negative or non-finite amounts become 0.
    pub fn set_check_amount(&mut self, amount: Amount) {
        let amount = if amount.is_finite() && amount > 0.0 { amount } else { 0.0 };
        if amount.to_bits() == self.input.check_amount.to_bits() {
            return;
        }
        self.input.check_amount = amount;
        self.notify();
    }

    /// Set the party size, clamped into the selectable range.
    /// Returns the size actually stored.
    pub fn set_party_size(&mut self, party_size: PartySize) -> PartySize {
        let clamped = party_size.clamp(*self.party_sizes.start(), *self.party_sizes.end());
        if clamped != party_size {
            debug!(requested = party_size, clamped, "party size clamped");
        }
        if clamped != self.input.party_size {
            self.input.party_size = clamped;
            self.notify();
        }
        clamped
    }

    /// Select one of the offered tips. Anything else is ignored.
    pub fn set_tip_percentage(&mut self, tip_percentage: TipPercentage) -> bool {
        if !self.tip_options.contains(&tip_percentage) {
            debug!(tip_percentage, "tip percentage not offered");
            return false;
        }
        if tip_percentage != self.input.tip_percentage {
            self.input.tip_percentage = tip_percentage;
            self.notify();
        }
        true
    }

    /// Register a renderer. It is called once right away with the current
    /// totals, then after every change.
    pub fn subscribe<F>(&mut self, mut callback: F) -> SubscriptionId
    where
        F: FnMut(&BillResult) + 'static,
    {
        if let Ok(result) = self.result() {
            callback(&result);
        }

        let id = self.next_subscription;
        self.next_subscription += 1;
        self.subscribers.push((id, Box::new(callback)));
        id
    }

    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.subscribers.len();
        self.subscribers.retain(|(sid, _)| *sid != id);
        self.subscribers.len() != before
    }

    pub fn formatted_grand_total(&self) -> Result<String, SplitError> {
        Ok(self.formatter.format_currency(self.result()?.grand_total))
    }

    pub fn formatted_per_person(&self) -> Result<String, SplitError> {
        Ok(self.formatter.format_currency(self.result()?.per_person))
    }

    pub fn formatter(&self) -> &dyn CurrencyFormatter {
        self.formatter.as_ref()
    }

    pub fn focus_amount(&mut self) {
        self.amount_focused = true;
    }

    /// The "Done" action: release the amount field so the keyboard goes away.
    pub fn dismiss_input(&mut self) {
        self.amount_focused = false;
    }

    pub fn is_amount_focused(&self) -> bool {
        self.amount_focused
    }

    // === Private methods ===

    fn notify(&mut self) {
        let Ok(result) = self.input.result() else {
            return;
        };

        trace!(subscribers = self.subscribers.len(), "publishing split result");
        for (_, subscriber) in self.subscribers.iter_mut() {
            subscriber(&result);
        }
    }
}

impl Default for SplitStore {
    fn default() -> Self {
        Self::new(SplitConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calculator;
    use std::cell::RefCell;
    use std::rc::Rc;

    fn recorder(store: &mut SplitStore) -> (SubscriptionId, Rc<RefCell<Vec<BillResult>>>) {
        let seen = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&seen);
        let id = store.subscribe(move |r| sink.borrow_mut().push(*r));
        (id, seen)
    }

    #[test]
    fn test_initial_state() {
        let store = SplitStore::default();
        assert_eq!(store.input(), BillInput::default());
        assert_eq!(store.tip_options(), &[10, 15, 20, 25, 0]);
        assert_eq!(store.party_sizes(), 2..=99);
        assert_eq!(store.result().unwrap(), BillResult { grand_total: 0.0, per_person: 0.0 });
        assert!(!store.is_amount_focused());
    }

    #[test]
    fn test_subscribe_sees_current_result() {
        let mut store = SplitStore::default();
        let (_, seen) = recorder(&mut store);
        assert_eq!(seen.borrow().len(), 1);
    }

    #[test]
    fn test_edits_recompute() {
        let mut store = SplitStore::default();
        let (_, seen) = recorder(&mut store);

        store.set_check_amount(100.0);
        store.set_party_size(4);
        assert!(store.set_tip_percentage(20));

        let seen = seen.borrow();
        assert_eq!(seen.len(), 3);
        assert_eq!(*seen.last().unwrap(), BillResult { grand_total: 120.0, per_person: 30.0 });
    }

    #[test]
    fn test_unchanged_input_does_not_notify() {
        let mut store = SplitStore::default();
        let (_, seen) = recorder(&mut store);

        store.set_check_amount(0.0);
        store.set_party_size(2);
        store.set_tip_percentage(20);

        assert_eq!(seen.borrow().len(), 1);
    }

    #[test]
    fn test_party_size_is_clamped() {
        let mut store = SplitStore::default();
        assert_eq!(store.set_party_size(0), 2);
        assert_eq!(store.set_party_size(500), 99);
        assert_eq!(store.input().party_size, 99);
    }

    #[test]
    fn test_zero_minimum_still_clamps_to_one() {
        let config = SplitConfig { min_party_size: 0, default_party_size: 0, ..Default::default() };
        let mut store = SplitStore::new(config);
        assert_eq!(store.input().party_size, 1);
        assert_eq!(store.set_party_size(0), 1);
        assert!(store.result().is_ok());
    }

    #[test]
    fn test_unknown_tip_rejected() {
        let mut store = SplitStore::default();
        assert!(!store.set_tip_percentage(18));
        assert_eq!(store.input().tip_percentage, 20);
        assert!(store.set_tip_percentage(0));
        assert_eq!(store.input().tip_percentage, 0);
    }

    #[test]
    fn test_bad_amounts_become_zero() {
        let mut store = SplitStore::default();
        store.set_check_amount(40.0);
        store.set_check_amount(-5.0);
        assert_eq!(store.input().check_amount, 0.0);
        store.set_check_amount(f64::NAN);
        assert_eq!(store.input().check_amount, 0.0);
    }

    #[test]
    fn test_unsubscribe() {
        let mut store = SplitStore::default();
        let (id, seen) = recorder(&mut store);

        assert!(store.unsubscribe(id));
        assert!(!store.unsubscribe(id));
        store.set_check_amount(10.0);

        assert_eq!(seen.borrow().len(), 1);
    }

    #[test]
    fn test_subscribers_called_in_order() {
        let mut store = SplitStore::default();
        let order = Rc::new(RefCell::new(Vec::new()));
        for tag in ["first", "second"] {
            let order = Rc::clone(&order);
            store.subscribe(move |_| order.borrow_mut().push(tag));
        }
        order.borrow_mut().clear();

        store.set_check_amount(12.0);
        assert_eq!(*order.borrow(), vec!["first", "second"]);
    }

    #[test]
    fn test_formatted_totals() {
        let mut store = SplitStore::default();
        store.set_check_amount(100.0);
        store.set_party_size(3);
        assert_eq!(store.formatted_grand_total().unwrap(), "$120.00");
        assert_eq!(store.formatted_per_person().unwrap(), "$40.00");
    }

    #[test]
    fn test_currency_code_overrides_locale() {
        let config = SplitConfig { currency_code: "EUR".into(), ..Default::default() };
        let mut store = SplitStore::new(config);
        store.set_check_amount(10.0);
        assert_eq!(store.formatter().currency_code(), "EUR");
        assert_eq!(store.formatted_grand_total().unwrap(), "12,00\u{a0}€");
    }

    struct Cents;

    impl CurrencyFormatter for Cents {
        fn currency_code(&self) -> &str {
            "XTS"
        }

        fn format_currency(&self, amount: Amount) -> String {
            format!("{}c", (amount * 100.0) as i64)
        }
    }

    #[test]
    fn test_custom_formatter() {
        let mut store = SplitStore::with_formatter(SplitConfig::default(), Box::new(Cents));
        store.set_check_amount(50.0);
        store.set_tip_percentage(0);
        assert_eq!(store.formatter().currency_code(), "XTS");
        assert_eq!(store.formatted_grand_total().unwrap(), "5000c");
        assert_eq!(store.formatted_per_person().unwrap(), "2500c");
    }

    #[test]
    fn test_display_leaves_result_unchanged() {
        let expected = calculator::compute(100.0, 3, 15).unwrap();

        let mut store = SplitStore::default();
        store.set_check_amount(100.0);
        store.set_party_size(3);
        store.set_tip_percentage(15);
        assert_eq!(store.formatted_grand_total().unwrap(), "$115.00");
        assert_eq!(store.formatted_per_person().unwrap(), "$38.33");

        let after = store.result().unwrap();
        assert_eq!(after.grand_total.to_bits(), expected.grand_total.to_bits());
        assert_eq!(after.per_person.to_bits(), expected.per_person.to_bits());
        assert_eq!(store.input(), BillInput::new(100.0, 3, 15));
    }

    #[test]
    fn test_done_dismisses_focus() {
        let mut store = SplitStore::default();
        store.focus_amount();
        assert!(store.is_amount_focused());
        store.dismiss_input();
        assert!(!store.is_amount_focused());
    }
}
