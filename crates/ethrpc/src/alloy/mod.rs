pub mod errors;
mod instrumentation;

#[cfg(any(test, feature = "test-util"))]
use alloy::providers::mock::Asserter;
use {
    crate::AlloyProvider,
    alloy::{
        providers::{Provider, ProviderBuilder},
        rpc::client::ClientBuilder,
    },
    instrumentation::InstrumentationLayer,
    url::Url,
};

/// Creates a provider talking to the node at `url`. The provider does not
/// hold any signing keys and does not fill transactions: they are sent with
/// `eth_sendTransaction` and the node fills in nonce and gas and signs them
/// with whatever account it manages for the `from` address.
pub fn provider(url: &Url) -> AlloyProvider {
    let rpc = ClientBuilder::default()
        .layer(InstrumentationLayer)
        .http(url.clone());
    ProviderBuilder::new()
        .disable_recommended_fillers()
        .connect_client(rpc)
        .erased()
}

/// Creates a provider whose responses are scripted through the `asserter`.
#[cfg(any(test, feature = "test-util"))]
pub fn mocked_provider(asserter: Asserter) -> AlloyProvider {
    ProviderBuilder::new()
        .disable_recommended_fillers()
        .connect_mocked_client(asserter)
        .erased()
}
