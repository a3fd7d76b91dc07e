// Property-based tests for invoice line pricing and totals aggregation
//
// Line amounts reconcile exactly (net = gross - discount, total = net + VAT)
// and the invoice total is always the rounded subtotal plus the rounded VAT.

use proptest::prelude::*;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use facturix::core::money::round2;
use facturix::invoices::{InvoiceLineInput, InvoiceTotals, InvoiceTotalsCalculator};
use facturix::taxes::{TaxRate, TaxTable};

fn tax_table() -> TaxTable {
    vec![
        TaxRate::new(1, "TVA16", dec!(16)),
        TaxRate::new(2, "EXO", dec!(0)),
        TaxRate::new(3, "TVA8", dec!(8)),
        TaxRate::new(4, "FULL", dec!(100)),
    ]
    .into_iter()
    .collect()
}

/// Quantity in hundredths, price in cents, discount in hundredths of a percent
fn line_strategy() -> impl Strategy<Value = InvoiceLineInput> {
    (
        0i64..100_000,
        0i64..10_000_000,
        0i64..=10_000,
        prop_oneof![Just(0i64), 1i64..=4, Just(999i64)],
    )
        .prop_map(|(quantity, price, discount, tax_id)| {
            InvoiceLineInput::new(1, Decimal::new(quantity, 2), Decimal::new(price, 2), tax_id)
                .with_discount(Decimal::new(discount, 2))
        })
}

proptest! {
    /// Property: net = gross - discount and total = net + VAT, exactly
    #[test]
    fn test_line_amounts_reconcile(line in line_strategy()) {
        let calculator = InvoiceTotalsCalculator::new();
        let amounts = calculator.compute_line(&line, &tax_table());

        prop_assert_eq!(amounts.net_amount_excl_tax, amounts.gross_amount - amounts.discount_amount);
        prop_assert_eq!(amounts.total_amount_incl_tax, amounts.net_amount_excl_tax + amounts.vat_amount);
        prop_assert!(amounts.net_amount_excl_tax >= Decimal::ZERO);
        prop_assert!(amounts.vat_amount >= Decimal::ZERO);
    }

    /// Property: totalInclTax = subtotal + VAT, each rounded from the raw sums
    #[test]
    fn test_totals_reconcile(lines in prop::collection::vec(line_strategy(), 0..20)) {
        let calculator = InvoiceTotalsCalculator::new();
        let taxes = tax_table();
        let totals = calculator.compute_totals(&lines, &taxes);

        let (net_sum, vat_sum) = lines.iter().fold((Decimal::ZERO, Decimal::ZERO), |(net, vat), line| {
            let amounts = calculator.compute_line(line, &taxes);
            (net + amounts.net_amount_excl_tax, vat + amounts.vat_amount)
        });

        prop_assert_eq!(totals.subtotal_excl_tax, round2(net_sum));
        prop_assert_eq!(totals.total_vat, round2(vat_sum));
        prop_assert_eq!(totals.total_incl_tax, totals.subtotal_excl_tax + totals.total_vat);
        prop_assert!(totals.subtotal_excl_tax.scale() <= 2);
        prop_assert!(totals.total_vat.scale() <= 2);
    }

    /// Property: a larger discount never yields a larger net amount
    #[test]
    fn test_discount_is_monotonic(
        line in line_strategy(),
        lower in 0i64..=10_000,
        higher in 0i64..=10_000,
    ) {
        let (lower, higher) = if lower <= higher { (lower, higher) } else { (higher, lower) };
        let calculator = InvoiceTotalsCalculator::new();
        let taxes = tax_table();

        let small = calculator.compute_line(&line.clone().with_discount(Decimal::new(lower, 2)), &taxes);
        let large = calculator.compute_line(&line.with_discount(Decimal::new(higher, 2)), &taxes);

        prop_assert!(large.net_amount_excl_tax <= small.net_amount_excl_tax);
        prop_assert!(large.total_amount_incl_tax <= small.total_amount_incl_tax);
    }

    /// Property: raising one line's quantity or unit price never lowers the
    /// invoice total
    #[test]
    fn test_total_grows_with_quantity_and_price(
        lines in prop::collection::vec(line_strategy(), 1..10),
        pick in any::<prop::sample::Index>(),
        step in 0i64..100_000,
    ) {
        let calculator = InvoiceTotalsCalculator::new();
        let taxes = tax_table();
        let index = pick.index(lines.len());
        let step = Decimal::new(step, 2);
        let before = calculator.compute_totals(&lines, &taxes).total_incl_tax;

        let mut more_quantity = lines.clone();
        let quantity = more_quantity[index].quantity.value() + step;
        more_quantity[index].quantity = quantity.into();
        prop_assert!(calculator.compute_totals(&more_quantity, &taxes).total_incl_tax >= before);

        let mut higher_price = lines.clone();
        let unit_price = higher_price[index].unit_price.value() + step;
        higher_price[index].unit_price = unit_price.into();
        prop_assert!(calculator.compute_totals(&higher_price, &taxes).total_incl_tax >= before);
    }

    /// Property: the submitted line amounts are the ones the preview showed
    #[test]
    fn test_submission_matches_preview(lines in prop::collection::vec(line_strategy(), 1..10)) {
        let calculator = InvoiceTotalsCalculator::new();
        let taxes = tax_table();

        let preview = calculator.preview(&lines, &taxes);
        let submission = calculator.to_submission_payload(&lines, &taxes);

        prop_assert_eq!(submission.totals, preview.totals);
        for ((payload, input), shown) in submission.lines.iter().zip(&lines).zip(&preview.lines) {
            prop_assert_eq!(payload.amounts(taxes.rate_for(input.tax_id)), *shown);
            prop_assert_eq!(payload.amounts(shown.tax_rate), calculator.compute_line(input, &taxes));
        }
    }
}

#[test]
fn test_no_lines_total_zero() {
    let totals = InvoiceTotalsCalculator::new().compute_totals(&[], &tax_table());

    assert_eq!(totals, InvoiceTotals::default());
    assert_eq!(totals.subtotal_excl_tax, Decimal::ZERO);
    assert_eq!(totals.total_vat, Decimal::ZERO);
    assert_eq!(totals.total_incl_tax, Decimal::ZERO);
}

#[test]
fn test_full_discount_zeroes_line() {
    let line = InvoiceLineInput::new(1, dec!(4), dec!(12.5), 1).with_discount(dec!(100));
    let amounts = InvoiceTotalsCalculator::new().compute_line(&line, &tax_table());

    assert_eq!(amounts.gross_amount, dec!(50));
    assert_eq!(amounts.discount_amount, dec!(50));
    assert_eq!(amounts.net_amount_excl_tax, Decimal::ZERO);
    assert_eq!(amounts.vat_amount, Decimal::ZERO);
    assert_eq!(amounts.total_amount_incl_tax, Decimal::ZERO);
}

#[test]
fn test_zero_discount_keeps_gross() {
    let line = InvoiceLineInput::new(1, dec!(4), dec!(12.5), 2).with_discount(dec!(0));
    let amounts = InvoiceTotalsCalculator::new().compute_line(&line, &tax_table());

    assert_eq!(amounts.net_amount_excl_tax, amounts.gross_amount);
    assert_eq!(amounts.vat_amount, Decimal::ZERO);
}

#[test]
fn test_unresolved_tax_contributes_no_vat() {
    let calculator = InvoiceTotalsCalculator::new();
    let unresolved = InvoiceLineInput::new(1, dec!(1), dec!(25), 999);
    let unset = InvoiceLineInput::new(1, dec!(1), dec!(25), 0);

    for line in [unresolved, unset] {
        let amounts = calculator.compute_line(&line, &tax_table());
        assert_eq!(amounts.tax_rate, Decimal::ZERO);
        assert_eq!(amounts.vat_amount, Decimal::ZERO);
        assert_eq!(amounts.total_amount_incl_tax, dec!(25));
    }
}

#[test]
fn test_single_line_at_sixteen_percent() {
    let line = InvoiceLineInput::new(1, dec!(2), dec!(50), 1).with_discount(dec!(0));
    let amounts = InvoiceTotalsCalculator::new().compute_line(&line, &tax_table());

    assert_eq!(amounts.net_amount_excl_tax, dec!(100));
    assert_eq!(amounts.vat_amount, dec!(16));
    assert_eq!(amounts.total_amount_incl_tax, dec!(116));
}

#[test]
fn test_discounted_line() {
    let line = InvoiceLineInput::new(1, dec!(3), dec!(10), 1).with_discount(dec!(10));
    let amounts = InvoiceTotalsCalculator::new().compute_line(&line, &tax_table());

    assert_eq!(amounts.gross_amount, dec!(30));
    assert_eq!(amounts.discount_amount, dec!(3));
    assert_eq!(amounts.net_amount_excl_tax, dec!(27));
    assert_eq!(amounts.vat_amount, dec!(4.32));
    assert_eq!(amounts.total_amount_incl_tax, dec!(31.32));
}

#[test]
fn test_mixed_resolved_and_unresolved_lines() {
    let lines = vec![
        InvoiceLineInput::new(1, dec!(1), dec!(25), 999).with_discount(dec!(0)),
        InvoiceLineInput::new(2, dec!(2), dec!(50), 1).with_discount(dec!(0)),
    ];
    let totals = InvoiceTotalsCalculator::new().compute_totals(&lines, &tax_table());

    assert_eq!(totals.subtotal_excl_tax, dec!(125));
    assert_eq!(totals.total_vat, dec!(16));
    assert_eq!(totals.total_incl_tax, dec!(141));
}

/// The invoice total is the sum of the rounded parts. Rounding the raw
/// grand total instead would give 0.01 here.
#[test]
fn test_total_is_sum_of_rounded_parts() {
    let line = InvoiceLineInput::new(1, dec!(1), dec!(0.005), 4);
    let calculator = InvoiceTotalsCalculator::new();

    let amounts = calculator.compute_line(&line, &tax_table());
    assert_eq!(amounts.net_amount_excl_tax, dec!(0.005));
    assert_eq!(amounts.vat_amount, dec!(0.005));
    assert_eq!(round2(amounts.total_amount_incl_tax), dec!(0.01));

    let totals = calculator.compute_totals(&[line], &tax_table());
    assert_eq!(totals.subtotal_excl_tax, dec!(0.01));
    assert_eq!(totals.total_vat, dec!(0.01));
    assert_eq!(totals.total_incl_tax, dec!(0.02));
}

#[test]
fn test_rounding_happens_once_on_sums() {
    // Three lines of 0.004 VAT each: rounding per line would give 0.00
    let lines: Vec<_> = (0..3)
        .map(|_| InvoiceLineInput::new(1, dec!(1), dec!(0.025), 1))
        .collect();
    let totals = InvoiceTotalsCalculator::new().compute_totals(&lines, &tax_table());

    assert_eq!(totals.subtotal_excl_tax, dec!(0.08));
    assert_eq!(totals.total_vat, dec!(0.01));
    assert_eq!(totals.total_incl_tax, dec!(0.09));
}
