//! Deploys the mock token and the yield farm, and drives them from the
//! command line.

mod config;

use anyhow::Context;
use config::DeployConfig;
use odra::casper_types::{U256, U512};
use odra::host::{HostEnv, HostRef};
use odra::prelude::Addressable;
use odra::schema::casper_contract_schema::NamedCLType;
use odra_cli::{
    deploy::DeployScript,
    scenario::{Args, Error, Scenario, ScenarioMetadata},
    CommandArg, ContractProvider, DeployedContractsContainer, DeployerExt, OdraCli,
};
use serde::Serialize;
use yield_farm::farm::YieldFarmInitArgs;
use yield_farm::token::{MockDaiInitArgs, UNITS_PER_TOKEN};
use yield_farm::{MockDai, YieldFarm};

fn tokens(n: u64) -> U256 {
    U256::from(n) * U256::from(UNITS_PER_TOKEN)
}

fn amount_arg() -> CommandArg {
    CommandArg::new("amount", "Amount in whole tokens", NamedCLType::U64).required()
}

/// Deploys MockDai, then the farm pointed at it
pub struct FarmDeployScript {
    config: DeployConfig,
}

impl DeployScript for FarmDeployScript {
    fn deploy(
        &self,
        env: &HostEnv,
        container: &mut DeployedContractsContainer,
    ) -> Result<(), odra_cli::deploy::Error> {
        log::info!("Deploying with {:?}", self.config);

        let token = MockDai::load_or_deploy(
            env,
            MockDaiInitArgs {
                price_per_token: U512::from(self.config.price_per_token),
            },
            container,
            self.config.gas,
        )?;
        log::info!("MockDai deployed at {:?}", token.address());

        let farm = YieldFarm::load_or_deploy(
            env,
            YieldFarmInitArgs {
                token: token.address(),
                apy: self.config.apy,
                blocks_per_year: self.config.blocks_per_year,
            },
            container,
            self.config.gas,
        )?;
        log::info!("YieldFarm deployed at {:?}", farm.address());

        Ok(())
    }
}

/// Buys tokens from the faucet for the caller
pub struct FaucetScenario {
    gas: u64,
}

impl Scenario for FaucetScenario {
    fn args(&self) -> Vec<CommandArg> {
        vec![amount_arg()]
    }

    fn run(&self, env: &HostEnv, container: &DeployedContractsContainer, args: Args) -> Result<(), Error> {
        let token = container.contract_ref::<MockDai>(env)?;
        let amount = tokens(args.get_single::<u64>("amount")?);
        let cost = token.faucet_cost(amount);

        env.set_gas(self.gas);
        token.with_tokens(cost).faucet(amount);
        log::info!("Bought {} units for {} motes", amount, cost);
        Ok(())
    }
}

impl ScenarioMetadata for FaucetScenario {
    const NAME: &'static str = "faucet";
    const DESCRIPTION: &'static str = "Buys mock DAI from the faucet";
}

/// Approves the farm and deposits
pub struct DepositScenario {
    gas: u64,
}

impl Scenario for DepositScenario {
    fn args(&self) -> Vec<CommandArg> {
        vec![amount_arg()]
    }

    fn run(&self, env: &HostEnv, container: &DeployedContractsContainer, args: Args) -> Result<(), Error> {
        let mut token = container.contract_ref::<MockDai>(env)?;
        let mut farm = container.contract_ref::<YieldFarm>(env)?;
        let amount = tokens(args.get_single::<u64>("amount")?);

        env.set_gas(self.gas);
        token.approve(&farm.address(), &amount);
        env.set_gas(self.gas);
        farm.deposit(amount);
        log::info!("Deposited {} units", amount);
        Ok(())
    }
}

impl ScenarioMetadata for DepositScenario {
    const NAME: &'static str = "deposit";
    const DESCRIPTION: &'static str = "Approves and deposits mock DAI into the farm";
}

/// Withdraws part of the caller's balance
pub struct WithdrawScenario {
    gas: u64,
}

impl Scenario for WithdrawScenario {
    fn args(&self) -> Vec<CommandArg> {
        vec![amount_arg()]
    }

    fn run(&self, env: &HostEnv, container: &DeployedContractsContainer, args: Args) -> Result<(), Error> {
        let mut farm = container.contract_ref::<YieldFarm>(env)?;
        let amount = tokens(args.get_single::<u64>("amount")?);

        env.set_gas(self.gas);
        farm.withdraw(amount);
        log::info!("Withdrew {} units", amount);
        Ok(())
    }
}

impl ScenarioMetadata for WithdrawScenario {
    const NAME: &'static str = "withdraw";
    const DESCRIPTION: &'static str = "Withdraws mock DAI from the farm";
}

#[derive(Serialize)]
struct PositionReport {
    account: String,
    balance: String,
    principal: String,
    last_block: u64,
    current_block: u64,
    apy: u32,
}

/// Prints the caller's position
pub struct BalanceScenario;

impl Scenario for BalanceScenario {
    fn args(&self) -> Vec<CommandArg> {
        vec![]
    }

    fn run(&self, env: &HostEnv, container: &DeployedContractsContainer, _args: Args) -> Result<(), Error> {
        let farm = container.contract_ref::<YieldFarm>(env)?;
        let account = env.caller();
        let position = farm.deposits(account);

        let report = PositionReport {
            account: format!("{:?}", account),
            balance: farm.get_balance(account).to_string(),
            principal: position.amount.to_string(),
            last_block: position.last_block,
            current_block: farm.current_block(),
            apy: farm.apy(),
        };
        match serde_json::to_string_pretty(&report) {
            Ok(json) => println!("{json}"),
            Err(err) => log::error!("Failed to render position: {err}"),
        }
        Ok(())
    }
}

impl ScenarioMetadata for BalanceScenario {
    const NAME: &'static str = "balance";
    const DESCRIPTION: &'static str = "Shows the caller's compounded balance";
}

/// Owner-only APY update
pub struct SetApyScenario {
    gas: u64,
}

impl Scenario for SetApyScenario {
    fn args(&self) -> Vec<CommandArg> {
        vec![CommandArg::new("apy", "New APY in percent", NamedCLType::U32).required()]
    }

    fn run(&self, env: &HostEnv, container: &DeployedContractsContainer, args: Args) -> Result<(), Error> {
        let mut farm = container.contract_ref::<YieldFarm>(env)?;
        let apy = args.get_single::<u32>("apy")?;

        env.set_gas(self.gas);
        farm.set_apy(apy);
        log::info!("APY set to {}%", farm.apy());
        Ok(())
    }
}

impl ScenarioMetadata for SetApyScenario {
    const NAME: &'static str = "set-apy";
    const DESCRIPTION: &'static str = "Changes the farm APY (owner only)";
}

pub fn main() -> anyhow::Result<()> {
    env_logger::init();

    let config = DeployConfig::load().context("Failed to load deploy config")?;
    let gas = config.gas;

    OdraCli::new()
        .about("CLI tool for the yield farm")
        .deploy(FarmDeployScript { config })
        .contract::<MockDai>()
        .contract::<YieldFarm>()
        .scenario(FaucetScenario { gas })
        .scenario(DepositScenario { gas })
        .scenario(WithdrawScenario { gas })
        .scenario(BalanceScenario)
        .scenario(SetApyScenario { gas })
        .build()
        .run();
    Ok(())
}
