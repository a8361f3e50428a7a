//! Shared fixture: a three-member group on a nullable chain and host.
#![allow(dead_code)]

use rosca_nullables::{NullChain, NullHost};
use rosca_pool::{
    CreateParams, FairnessMode, GroupSetup, PayoutRecord, PoolError, RotatingGroup, Schedule,
};
use rosca_reserve::AssetLedger;
use rosca_types::{AccountId, TokenAmount};
use rosca_verification::{Disclosure, IdentityRequirements};

pub const WEEK: u64 = 7 * 24 * 60 * 60;
pub const CONTRIBUTION: u128 = 100;
pub const STARTING_BALANCE: u128 = 1_000;

pub const GROUP: AccountId = AccountId::new([0x10; 20]);
pub const ASSET: AccountId = AccountId::new([0x20; 20]);
pub const MARKET: AccountId = AccountId::new([0x30; 20]);
pub const RECEIPT: AccountId = AccountId::new([0x40; 20]);
pub const HUB: AccountId = AccountId::new([0x50; 20]);
pub const FEE: AccountId = AccountId::new([0x60; 20]);
pub const OPERATOR: AccountId = AccountId::new([0x70; 20]);

pub const ALICE: AccountId = AccountId::new([0x01; 20]);
pub const BOB: AccountId = AccountId::new([0x02; 20]);
pub const CAROL: AccountId = AccountId::new([0x03; 20]);
pub const DAVE: AccountId = AccountId::new([0x04; 20]);

pub const MEMBERS: [AccountId; 3] = [ALICE, BOB, CAROL];

pub fn setup() -> GroupSetup {
    GroupSetup {
        group_account: GROUP,
        label: "market stall circle".into(),
        asset: ASSET,
        reserve_market: MARKET,
        reserve_receipt: RECEIPT,
        verification_hub: HUB,
        fee_recipient: FEE,
        operator: OPERATOR,
    }
}

pub fn schedule(total_periods: u32) -> Schedule {
    Schedule {
        deposit_interval_secs: WEEK,
        distribution_interval_secs: WEEK,
        contribution: TokenAmount::new(CONTRIBUTION),
        total_periods,
    }
}

pub struct Pool {
    pub chain: NullChain,
    pub host: NullHost,
    pub group: RotatingGroup,
}

impl Pool {
    /// Alice creates the group; Bob and Carol are invited and join. Every member
    /// (and Dave) is funded and has approved the group for their whole balance.
    pub fn new(identity: IdentityRequirements, fairness: FairnessMode, total_periods: u32) -> Self {
        let chain = NullChain::default();
        let mut host = NullHost::new(MARKET, RECEIPT);
        let mut group = RotatingGroup::new();

        group.initialize(setup()).unwrap();
        group
            .create_group(
                &chain.call(ALICE),
                CreateParams {
                    creator: ALICE,
                    schedule: schedule(total_periods),
                    identity,
                    fairness,
                    invitees: vec![BOB, CAROL],
                },
            )
            .unwrap();
        for member in [BOB, CAROL] {
            group.join_group(&chain.call(member)).unwrap();
        }
        for account in [ALICE, BOB, CAROL, DAVE] {
            host.mint(&ASSET, &account, STARTING_BALANCE);
            host.approve(&ASSET, &account, &GROUP, TokenAmount::new(STARTING_BALANCE))
                .unwrap();
        }
        group.drain_events();

        Self { chain, host, group }
    }

    pub fn open(total_periods: u32) -> Self {
        Self::new(IdentityRequirements::none(), FairnessMode::OperatorTrust, total_periods)
    }

    pub fn deposit(&mut self, who: AccountId) -> Result<u32, PoolError> {
        let ctx = self.chain.call(who);
        self.group.deposit(&mut self.host, &ctx)
    }

    pub fn deposit_all(&mut self) {
        for member in MEMBERS {
            self.deposit(member).unwrap();
        }
    }

    pub fn distribute(&mut self, candidates: &[AccountId]) -> Result<PayoutRecord, PoolError> {
        self.distribute_as(OPERATOR, candidates)
    }

    pub fn distribute_as(
        &mut self,
        caller: AccountId,
        candidates: &[AccountId],
    ) -> Result<PayoutRecord, PoolError> {
        let ctx = self.chain.call(caller);
        self.group.distribute_funds(&mut self.host, &ctx, candidates)
    }

    pub fn verify(&mut self, who: AccountId, disclosure: Disclosure) -> Result<(), PoolError> {
        let ctx = self.chain.call(HUB);
        self.group.on_verification_result(&ctx, who, &disclosure, &GROUP)
    }

    pub fn asset_balance(&self, holder: &AccountId) -> u128 {
        self.host.balance(&ASSET, holder)
    }

    pub fn receipt_balance(&self, holder: &AccountId) -> u128 {
        self.host.balance(&RECEIPT, holder)
    }
}
