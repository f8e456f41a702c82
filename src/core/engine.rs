use super::types::{MonthRow, SimulationInput, SimulationResult};

/// Rounds to two decimal places, half away from zero. The epsilon nudge keeps
/// values sitting just under a half-cent boundary from rounding down.
pub fn round2(value: f64) -> f64 {
    ((value + f64::EPSILON) * 100.0).round() / 100.0
}

/// Runs the month-by-month compounding projection.
///
/// Each month the contribution lands first, then interest is applied, so a
/// deposit earns interest in the month it is made. The running `balance` and
/// `invested` accumulators stay unrounded across iterations; only the
/// recorded snapshots and the final aggregates are rounded. The final
/// `total_interest` is recomputed from the rounded totals, so it may differ
/// from the last row's interest figure by one cent.
pub fn simulate(input: &SimulationInput) -> SimulationResult {
    let mut balance = input.principal;
    let mut invested = input.principal;
    let mut rows = Vec::with_capacity(input.months as usize);

    for month in 1..=input.months {
        if input.monthly_contribution > 0.0 {
            balance += input.monthly_contribution;
            invested += input.monthly_contribution;
        }

        balance *= 1.0 + input.monthly_rate;

        let interest = balance - invested;
        rows.push(MonthRow {
            month,
            balance: round2(balance),
            invested: round2(invested),
            interest: round2(interest),
        });
    }

    let final_balance = round2(balance);
    let total_invested = round2(invested);
    let total_interest = round2(final_balance - total_invested);

    SimulationResult {
        final_balance,
        total_invested,
        total_interest,
        rows,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::{prop_assert, prop_assert_eq, proptest};

    const EPS: f64 = 1e-9;

    fn assert_approx(actual: f64, expected: f64) {
        assert!(
            (actual - expected).abs() <= EPS,
            "expected {expected}, got {actual}"
        );
    }

    fn input(principal: f64, monthly: f64, rate: f64, months: u32) -> SimulationInput {
        SimulationInput {
            principal,
            monthly_contribution: monthly,
            monthly_rate: rate,
            months,
        }
    }

    #[test]
    fn round2_rounds_half_up() {
        assert_approx(round2(1.005), 1.01);
        assert_approx(round2(12.344), 12.34);
        assert_approx(round2(12.346), 12.35);
        assert_approx(round2(0.0), 0.0);
    }

    #[test]
    fn first_month_contribution_earns_interest_immediately() {
        let result = simulate(&input(1000.0, 200.0, 0.01, 24));

        let first = result.rows[0];
        assert_eq!(first.month, 1);
        assert_approx(first.invested, 1200.0);
        assert_approx(first.balance, 1212.0);
        assert_approx(first.interest, 12.0);
    }

    #[test]
    fn final_balance_matches_replayed_recurrence() {
        let result = simulate(&input(1000.0, 200.0, 0.01, 24));

        let mut balance = 1000.0_f64;
        for _ in 0..24 {
            balance = (balance + 200.0) * 1.01;
        }
        assert_approx(result.final_balance, round2(balance));
        assert_approx(result.total_invested, round2(1000.0 + 200.0 * 24.0));
        assert_approx(
            result.total_interest,
            round2(result.final_balance - result.total_invested),
        );
    }

    #[test]
    fn zero_months_yields_principal_and_no_rows() {
        let result = simulate(&input(1234.567, 200.0, 0.01, 0));

        assert!(result.rows.is_empty());
        assert_approx(result.final_balance, 1234.57);
        assert_approx(result.total_invested, 1234.57);
        assert_approx(result.total_interest, 0.0);
    }

    #[test]
    fn zero_rate_and_contribution_keeps_balance_flat() {
        let result = simulate(&input(500.0, 0.0, 0.0, 36));

        assert_eq!(result.rows.len(), 36);
        for row in &result.rows {
            assert_approx(row.balance, 500.0);
            assert_approx(row.invested, 500.0);
            assert_approx(row.interest, 0.0);
        }
        assert_approx(result.final_balance, 500.0);
        assert_approx(result.total_interest, 0.0);
    }

    #[test]
    fn contribution_only_growth_without_rate() {
        let result = simulate(&input(0.0, 100.0, 0.0, 12));

        assert_approx(result.final_balance, 1200.0);
        assert_approx(result.total_invested, 1200.0);
        assert_approx(result.total_interest, 0.0);
    }

    #[test]
    fn accumulator_is_not_rounded_between_months() {
        // With a rate that produces sub-cent amounts every month, rounding
        // the accumulator would visibly diverge from full-precision
        // compounding over a long horizon.
        let result = simulate(&input(1000.0, 0.0, 0.001234, 600));

        let mut expected = 1000.0_f64;
        for _ in 0..600 {
            expected *= 1.001234;
        }
        assert_approx(result.final_balance, round2(expected));
    }

    #[test]
    fn repeat_runs_are_bit_identical() {
        let i = input(2500.0, 150.0, 0.0075, 120);
        assert_eq!(simulate(&i), simulate(&i));
    }

    proptest! {
        #![proptest_config(proptest::test_runner::Config::with_cases(64))]

        #[test]
        fn prop_rows_are_sequential_and_complete(
            principal_cents in 0u64..100_000_000,
            monthly_cents in 0u64..1_000_000,
            rate_bp in 0u32..500,
            months in 0u32..=1200
        ) {
            let result = simulate(&input(
                principal_cents as f64 / 100.0,
                monthly_cents as f64 / 100.0,
                rate_bp as f64 / 10_000.0,
                months,
            ));

            prop_assert_eq!(result.rows.len(), months as usize);
            for (idx, row) in result.rows.iter().enumerate() {
                prop_assert_eq!(row.month, idx as u32 + 1);
            }
        }

        #[test]
        fn prop_total_invested_is_principal_plus_contributions(
            principal_cents in 0u64..100_000_000,
            monthly_cents in 0u64..1_000_000,
            rate_bp in 0u32..500,
            months in 0u32..=1200
        ) {
            let principal = principal_cents as f64 / 100.0;
            let monthly = monthly_cents as f64 / 100.0;
            let result = simulate(&input(principal, monthly, rate_bp as f64 / 10_000.0, months));

            let expected = round2(principal + monthly * months as f64);
            prop_assert!(
                (result.total_invested - expected).abs() <= 0.01,
                "total_invested {} vs expected {}", result.total_invested, expected
            );
        }

        #[test]
        fn prop_interest_is_never_negative_for_non_negative_rate(
            principal_cents in 0u64..100_000_000,
            monthly_cents in 0u64..1_000_000,
            rate_bp in 0u32..500,
            months in 0u32..=1200
        ) {
            let result = simulate(&input(
                principal_cents as f64 / 100.0,
                monthly_cents as f64 / 100.0,
                rate_bp as f64 / 10_000.0,
                months,
            ));

            prop_assert!(result.final_balance + 0.01 >= result.total_invested);
            prop_assert!(result.total_interest >= -0.01);
            for row in &result.rows {
                prop_assert!(row.interest >= -0.01);
            }
        }

        #[test]
        fn prop_final_figures_reconcile_with_last_row_within_a_cent(
            principal_cents in 0u64..100_000_000,
            monthly_cents in 0u64..1_000_000,
            rate_bp in 0u32..500,
            months in 1u32..=1200
        ) {
            let result = simulate(&input(
                principal_cents as f64 / 100.0,
                monthly_cents as f64 / 100.0,
                rate_bp as f64 / 10_000.0,
                months,
            ));

            let last = result.rows.last().unwrap();
            prop_assert!((result.final_balance - last.balance).abs() <= EPS);
            prop_assert!((result.total_invested - last.invested).abs() <= EPS);
            // The final interest is recomputed from rounded totals, so it may
            // sit one cent away from the last row's independently rounded one.
            prop_assert!((result.total_interest - last.interest).abs() <= 0.01 + EPS);
        }

        #[test]
        fn prop_simulation_is_pure(
            principal_cents in 0u64..100_000_000,
            monthly_cents in 0u64..1_000_000,
            rate_bp in 0u32..500,
            months in 0u32..=1200
        ) {
            let i = input(
                principal_cents as f64 / 100.0,
                monthly_cents as f64 / 100.0,
                rate_bp as f64 / 10_000.0,
                months,
            );
            prop_assert_eq!(simulate(&i), simulate(&i));
        }
    }
}
