use crate::{mock::*, tests::assert_custody_matches_pool, AccountBorrows, AccountSupplies, LTV_RATIO};
use rand::{rngs::StdRng, Rng, SeedableRng};

const ACCOUNTS: [AccountId; 4] = [ALICE, BOB, CHARLIE, DAVE];

fn assert_pool_invariants() {
    let total_supplied: Balance = AccountSupplies::<Test>::iter_values().sum();
    let total_borrowed: Balance = AccountBorrows::<Test>::iter_values().sum();
    assert_eq!(Lending::total_supply(), total_supplied);
    assert_eq!(Lending::total_borrows(), total_borrowed);
    assert!(Lending::total_borrows() <= Lending::total_supply());

    for account in ACCOUNTS.iter() {
        let position = Lending::get_user_position(account).unwrap();
        assert!(position.borrowed * 100 <= position.supplied * LTV_RATIO);
        assert!(position.health_factor.is_within_ltv());
    }
    assert_custody_matches_pool();
}

fn random_amount(rng: &mut StdRng, max: Balance) -> Balance {
    // mix exact limits, limits plus one and arbitrary amounts
    match rng.gen_range(0..4) {
        0 => max,
        1 => max.saturating_add(1),
        _ => rng.gen_range(0..=unit(2000)),
    }
}

#[test]
fn random_operations_preserve_invariants() {
    new_test_ext().execute_with(|| {
        let mut rng = StdRng::seed_from_u64(0x1e4d);
        for account in ACCOUNTS.iter() {
            approve_max(account);
        }

        for _ in 0..500 {
            let who = ACCOUNTS[rng.gen_range(0..ACCOUNTS.len())].clone();
            let origin = RuntimeOrigin::signed(who.clone());
            let pool_before = Lending::get_pool_info();

            // failures are expected, the invariants must hold either way
            let result = match rng.gen_range(0..4) {
                0 => {
                    let amount = rng.gen_range(0..=unit(3000));
                    Lending::supply(origin, amount)
                }
                1 => {
                    let max = Lending::calculate_max_withdraw(&who).unwrap();
                    Lending::withdraw(origin, random_amount(&mut rng, max))
                }
                2 => {
                    let max = Lending::calculate_max_borrow(&who).unwrap();
                    Lending::borrow(origin, random_amount(&mut rng, max))
                }
                _ => {
                    let debt = Lending::account_borrows(&who);
                    Lending::repay(origin, random_amount(&mut rng, debt))
                }
            };
            if result.is_err() {
                assert_eq!(Lending::get_pool_info(), pool_before);
            }

            assert_pool_invariants();
        }
    })
}
