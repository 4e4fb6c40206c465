use {
    crate::{artifacts::ContractFactory, error::Error, traits::Chain},
    alloy::{
        network::TransactionBuilder,
        primitives::{Address, B256, U256},
        providers::Provider,
        rpc::types::{TransactionReceipt, TransactionRequest},
        transports::TransportError,
    },
    anyhow::{Context, anyhow},
    ethrpc::{AlloyProvider, alloy::errors::describe},
    std::time::Duration,
};

/// [`Chain`] backed by a JSON-RPC node. The signer is the first account the
/// node manages; the node signs the deployment transaction itself.
pub struct NodeChain {
    provider: AlloyProvider,
}

impl NodeChain {
    pub fn new(provider: AlloyProvider) -> Self {
        Self { provider }
    }

    /// Polls the node until it returns a receipt for `tx_hash`.
    async fn wait_for_receipt(&self, tx_hash: B256) -> Result<TransactionReceipt, Error> {
        let poll_interval = self.provider.client().poll_interval();
        loop {
            let receipt = self
                .provider
                .get_transaction_receipt(tx_hash)
                .await
                .map_err(|err| confirmation_error(err, tx_hash))?;
            if let Some(receipt) = receipt {
                return Ok(receipt);
            }
            tokio::time::sleep(poll_interval).await;
        }
    }
}

#[async_trait::async_trait]
impl Chain for NodeChain {
    async fn chain_id(&self) -> Result<u64, Error> {
        self.provider
            .get_chain_id()
            .await
            .context("could not fetch current chain id")
            .map_err(Error::Connection)
    }

    async fn signer(&self) -> Result<Address, Error> {
        let accounts = self
            .provider
            .get_accounts()
            .await
            .context("could not fetch accounts")
            .map_err(Error::Connection)?;
        accounts
            .first()
            .copied()
            .ok_or_else(|| Error::Connection(anyhow!("node does not manage any account")))
    }

    async fn balance(&self, address: Address) -> Result<U256, Error> {
        self.provider
            .get_balance(address)
            .await
            .with_context(|| format!("could not fetch balance of {address}"))
            .map_err(Error::Connection)
    }

    async fn deploy(
        &self,
        from: Address,
        factory: &ContractFactory,
        timeout: Duration,
    ) -> Result<Address, Error> {
        let tx = TransactionRequest::default()
            .with_from(from)
            .with_deploy_code(factory.deploy_code()?);

        let pending = self
            .provider
            .send_transaction(tx)
            .await
            .map_err(submission_error)?;
        let tx_hash = *pending.tx_hash();
        tracing::debug!(?tx_hash, "submitted deployment transaction");

        let receipt = tokio::time::timeout(timeout, self.wait_for_receipt(tx_hash))
            .await
            .map_err(|_| {
                Error::Deployment(anyhow!(
                    "timed out after {timeout:?} waiting for transaction {tx_hash} to be mined"
                ))
            })??;
        tracing::debug!(
            ?tx_hash,
            block = ?receipt.block_number,
            gas_used = receipt.gas_used,
            "deployment mined"
        );

        if !receipt.status() {
            return Err(Error::Deployment(anyhow!(
                "transaction {tx_hash} reverted in block {:?}",
                receipt.block_number
            )));
        }
        receipt.contract_address.ok_or_else(|| {
            Error::Deployment(anyhow!(
                "receipt of {tx_hash} does not contain a contract address"
            ))
        })
    }
}

fn submission_error(err: TransportError) -> Error {
    let reason = describe(&err);
    Error::Deployment(anyhow::Error::new(err).context(reason))
}

fn confirmation_error(err: TransportError, tx_hash: B256) -> Error {
    let reason = describe(&err);
    Error::Deployment(anyhow::Error::new(err).context(format!("{reason} ({tx_hash})")))
}

#[cfg(test)]
mod tests {
    use {
        super::*,
        alloy::{
            json_abi::JsonAbi,
            primitives::{Bytes, address, b256},
            providers::mock::Asserter,
            rpc::json_rpc::ErrorPayload,
        },
        serde_json::json,
    };

    const ACCOUNT: Address = address!("0xf39Fd6e51aad88F6F4ce6aB8827279cffFb92266");

    fn chain() -> (Asserter, NodeChain) {
        let asserter = Asserter::new();
        let chain = NodeChain::new(ethrpc::alloy::mocked_provider(asserter.clone()));
        (asserter, chain)
    }

    #[tokio::test]
    async fn signer_is_first_node_account() {
        let (asserter, chain) = chain();
        asserter.push_success(&vec![ACCOUNT, Address::repeat_byte(1)]);

        assert_eq!(chain.signer().await.unwrap(), ACCOUNT);
    }

    #[tokio::test]
    async fn node_without_accounts_is_a_connection_error() {
        let (asserter, chain) = chain();
        asserter.push_success(&Vec::<Address>::new());

        assert!(matches!(chain.signer().await, Err(Error::Connection(_))));
    }

    #[tokio::test]
    async fn failing_node_is_a_connection_error() {
        let (asserter, chain) = chain();
        asserter.push_failure_msg("connection refused");

        assert!(matches!(chain.signer().await, Err(Error::Connection(_))));
    }

    #[tokio::test]
    async fn reads_balance_and_chain_id() {
        let (asserter, chain) = chain();
        let balance = U256::from(10_000u64) * U256::from(10u64).pow(U256::from(18u64));
        asserter.push_success(&balance);
        asserter.push_success(&U256::from(31337u64));

        assert_eq!(chain.balance(ACCOUNT).await.unwrap(), balance);
        assert_eq!(chain.chain_id().await.unwrap(), 31337);
    }

    #[tokio::test]
    async fn refuses_constructor_arguments_before_submitting() {
        let (_asserter, chain) = chain();
        let abi: JsonAbi = serde_json::from_str(
            r#"[{"inputs":[{"name":"admin","type":"address"}],"stateMutability":"nonpayable","type":"constructor"}]"#,
        )
        .unwrap();
        let factory = ContractFactory {
            name: "Owned".into(),
            abi,
            bytecode: Bytes::from_static(&[0x60, 0x80]),
        };

        let result = chain
            .deploy(ACCOUNT, &factory, Duration::from_secs(1))
            .await;
        assert!(matches!(result, Err(Error::Deployment(_))));
    }

    const CONTRACT: Address = address!("0x5FbDB2315678afecb367f032d93F642f64180aa3");
    const TX_HASH: B256 =
        b256!("0x2f1ad8a3c4e9fa1d3a7c6b1a7d5e0b3c9f8e7d6c5b4a39281706f5e4d3c2b1a0");

    fn factory() -> ContractFactory {
        ContractFactory {
            name: "EliteHealthSystem".into(),
            abi: JsonAbi::default(),
            bytecode: Bytes::from_static(&[0x60, 0x80, 0x60, 0x40, 0x52]),
        }
    }

    fn receipt(success: bool, contract_address: Option<Address>) -> serde_json::Value {
        let status = if success { "0x1" } else { "0x0" };
        json!({
            "type": "0x2",
            "status": status,
            "cumulativeGasUsed": "0x1d4c0",
            "logs": [],
            "logsBloom": format!("0x{}", "00".repeat(256)),
            "transactionHash": TX_HASH,
            "transactionIndex": "0x0",
            "blockHash": B256::repeat_byte(0xbb),
            "blockNumber": "0x1",
            "gasUsed": "0x1d4c0",
            "effectiveGasPrice": "0x3b9aca00",
            "from": ACCOUNT,
            "to": null,
            "contractAddress": contract_address,
        })
    }

    #[tokio::test]
    async fn deploys_and_returns_contract_address() {
        let (asserter, chain) = chain();
        asserter.push_success(&TX_HASH);
        asserter.push_success(&receipt(true, Some(CONTRACT)));

        let address = chain
            .deploy(ACCOUNT, &factory(), Duration::from_secs(5))
            .await
            .unwrap();
        assert_eq!(address, CONTRACT);
    }

    #[tokio::test]
    async fn waits_until_transaction_is_mined() {
        let (asserter, chain) = chain();
        asserter.push_success(&TX_HASH);
        asserter.push_success(&serde_json::Value::Null);
        asserter.push_success(&receipt(true, Some(CONTRACT)));

        let address = chain
            .deploy(ACCOUNT, &factory(), Duration::from_secs(30))
            .await
            .unwrap();
        assert_eq!(address, CONTRACT);
    }

    #[tokio::test]
    async fn reverted_receipt_is_a_deployment_error() {
        let (asserter, chain) = chain();
        asserter.push_success(&TX_HASH);
        asserter.push_success(&receipt(false, None));

        let err = chain
            .deploy(ACCOUNT, &factory(), Duration::from_secs(5))
            .await
            .unwrap_err();
        assert!(matches!(err, Error::Deployment(_)));
        assert!(err.to_string().contains("reverted"));
    }

    #[tokio::test]
    async fn receipt_without_contract_address_is_a_deployment_error() {
        let (asserter, chain) = chain();
        asserter.push_success(&TX_HASH);
        asserter.push_success(&receipt(true, None));

        let err = chain
            .deploy(ACCOUNT, &factory(), Duration::from_secs(5))
            .await
            .unwrap_err();
        assert!(matches!(err, Error::Deployment(_)));
        assert!(err.to_string().contains("does not contain a contract address"));
    }

    #[tokio::test]
    async fn revert_at_submission_is_a_deployment_error() {
        let (asserter, chain) = chain();
        asserter.push_failure(ErrorPayload {
            code: 3,
            message: "execution reverted".into(),
            data: None,
        });

        let err = chain
            .deploy(ACCOUNT, &factory(), Duration::from_secs(5))
            .await
            .unwrap_err();
        assert!(matches!(err, Error::Deployment(_)));
        assert!(err.to_string().contains("transaction reverted"));
    }

    #[tokio::test]
    async fn unmined_transaction_times_out() {
        let (asserter, chain) = chain();
        asserter.push_success(&TX_HASH);
        asserter.push_success(&serde_json::Value::Null);

        let err = chain
            .deploy(ACCOUNT, &factory(), Duration::from_millis(10))
            .await
            .unwrap_err();
        assert!(matches!(err, Error::Deployment(_)));
        assert!(err.to_string().contains("timed out"));
    }
}
