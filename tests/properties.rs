//! Property checks over generated bundles.

mod common;

use common::{TestContext, sample_config};
use payergen::GenerateOptions;
use proptest::prelude::*;

proptest! {
    #![proptest_config(ProptestConfig::with_cases(16))]

    #[test]
    fn dry_runs_are_reproducible_for_any_payer_id(payer_id in "[A-Z][A-Z0-9]{1,12}") {
        let ctx = TestContext::new();
        let mut value = sample_config();
        value["payerId"] = serde_json::json!(payer_id);
        let config = ctx.write_config("payer.json", &value);
        let options = GenerateOptions { dry_run: true, ..Default::default() };

        let first = payergen::generate(&config, &ctx.output_dir(), &options).unwrap();
        let second = payergen::generate(&config, &ctx.output_dir(), &options).unwrap();
        let digests = |report: &payergen::GenerationReport| {
            report.artifacts.iter().map(|a| (a.path.clone(), a.sha256.clone())).collect::<Vec<_>>()
        };
        prop_assert_eq!(digests(&first), digests(&second));

        prop_assert!(!ctx.output_dir().exists());
    }
}
