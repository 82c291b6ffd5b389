use crate::adapters::http::build_client;
use crate::adapters::{HttpGeoResolver, HttpIpResolver, HttpPassPredictor};
use crate::core::{
    ConfigProvider, Coordinates, GeoResolver, IpAddress, IpResolver, PassPredictor, PassWindow,
};
use crate::utils::error::Result;
use crate::utils::validation::validate_url;
use serde::Serialize;

/// Everything one pipeline run produced, stage by stage.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FlyoverReport {
    pub ip: IpAddress,
    pub coordinates: Coordinates,
    pub passes: Vec<PassWindow>,
}

/// IP lookup -> geolocation -> flyover prediction, strictly in sequence.
///
/// The first failing stage ends the run with its own error; later stages are
/// never called.
pub struct FlyoverPipeline<I: IpResolver, G: GeoResolver, P: PassPredictor> {
    ip_resolver: I,
    geo_resolver: G,
    pass_predictor: P,
}

impl<I: IpResolver, G: GeoResolver, P: PassPredictor> FlyoverPipeline<I, G, P> {
    pub fn new(ip_resolver: I, geo_resolver: G, pass_predictor: P) -> Self {
        Self {
            ip_resolver,
            geo_resolver,
            pass_predictor,
        }
    }

    pub async fn run(&self) -> Result<Vec<PassWindow>> {
        Ok(self.run_with_report().await?.passes)
    }

    pub async fn run_with_report(&self) -> Result<FlyoverReport> {
        tracing::debug!("Starting flyover pipeline");

        let ip = self.ip_resolver.resolve_ip().await?;
        let coordinates = self.geo_resolver.resolve_coordinates(&ip).await?;
        let passes = self.pass_predictor.predict_passes(&coordinates).await?;

        tracing::debug!("Flyover pipeline finished with {} passes", passes.len());
        Ok(FlyoverReport {
            ip,
            coordinates,
            passes,
        })
    }
}

impl FlyoverPipeline<HttpIpResolver, HttpGeoResolver, HttpPassPredictor> {
    /// Wires the HTTP adapters from configuration, sharing one client.
    pub fn from_config<C: ConfigProvider + ?Sized>(config: &C) -> Result<Self> {
        let client = build_client(config)?;
        let ip_endpoint = validate_url("endpoints.ip", config.ip_endpoint())?;
        let geo_endpoint = validate_url("endpoints.geolocation", config.geolocation_endpoint())?;
        let flyover_endpoint = validate_url("endpoints.flyover", config.flyover_endpoint())?;

        Ok(Self::new(
            HttpIpResolver::new(client.clone(), ip_endpoint),
            HttpGeoResolver::new(client.clone(), geo_endpoint),
            HttpPassPredictor::new(client, flyover_endpoint),
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::Stage;
    use crate::utils::error::FlyoverError;
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::{Arc, Mutex};

    #[derive(Clone, Default)]
    struct CallLog {
        calls: Arc<Mutex<Vec<&'static str>>>,
    }

    impl CallLog {
        fn record(&self, name: &'static str) {
            self.calls.lock().unwrap().push(name);
        }

        fn calls(&self) -> Vec<&'static str> {
            self.calls.lock().unwrap().clone()
        }
    }

    struct MockIpResolver {
        result: Option<&'static str>,
        log: CallLog,
    }

    #[async_trait]
    impl IpResolver for MockIpResolver {
        async fn resolve_ip(&self) -> Result<IpAddress> {
            self.log.record("ip");
            match self.result {
                Some(ip) => IpAddress::new(ip),
                None => Err(FlyoverError::NotFoundError {
                    stage: Stage::IpLookup,
                }),
            }
        }
    }

    struct MockGeoResolver {
        result: Option<(f64, f64)>,
        seen_ip: Arc<Mutex<Option<IpAddress>>>,
        log: CallLog,
    }

    #[async_trait]
    impl GeoResolver for MockGeoResolver {
        async fn resolve_coordinates(&self, ip: &IpAddress) -> Result<Coordinates> {
            self.log.record("geo");
            *self.seen_ip.lock().unwrap() = Some(ip.clone());
            match self.result {
                Some((lat, lon)) => Coordinates::new(lat, lon),
                None => Err(FlyoverError::ServerError {
                    stage: Stage::Geolocation,
                    status: 500,
                    body: "boom".to_string(),
                }),
            }
        }
    }

    struct MockPassPredictor {
        result: Vec<PassWindow>,
        call_count: Arc<AtomicUsize>,
        log: CallLog,
    }

    #[async_trait]
    impl PassPredictor for MockPassPredictor {
        async fn predict_passes(&self, _coords: &Coordinates) -> Result<Vec<PassWindow>> {
            self.log.record("passes");
            self.call_count.fetch_add(1, Ordering::SeqCst);
            Ok(self.result.clone())
        }
    }

    struct Fixture {
        log: CallLog,
        seen_ip: Arc<Mutex<Option<IpAddress>>>,
        predictor_calls: Arc<AtomicUsize>,
    }

    fn build(
        ip: Option<&'static str>,
        coords: Option<(f64, f64)>,
        passes: Vec<PassWindow>,
    ) -> (
        FlyoverPipeline<MockIpResolver, MockGeoResolver, MockPassPredictor>,
        Fixture,
    ) {
        let fixture = Fixture {
            log: CallLog::default(),
            seen_ip: Arc::new(Mutex::new(None)),
            predictor_calls: Arc::new(AtomicUsize::new(0)),
        };
        let pipeline = FlyoverPipeline::new(
            MockIpResolver {
                result: ip,
                log: fixture.log.clone(),
            },
            MockGeoResolver {
                result: coords,
                seen_ip: fixture.seen_ip.clone(),
                log: fixture.log.clone(),
            },
            MockPassPredictor {
                result: passes,
                call_count: fixture.predictor_calls.clone(),
                log: fixture.log.clone(),
            },
        );
        (pipeline, fixture)
    }

    #[tokio::test]
    async fn test_run_end_to_end_with_fakes() {
        let (pipeline, fixture) = build(
            Some("5.6.7.8"),
            Some((40.0, -70.0)),
            vec![PassWindow::new(1000, 600)],
        );

        let passes = pipeline.run().await.unwrap();

        assert_eq!(passes, vec![PassWindow::new(1000, 600)]);
        assert_eq!(
            serde_json::to_value(&passes).unwrap(),
            serde_json::json!([{"riseTime": 1000, "duration": 600}])
        );
        assert_eq!(fixture.log.calls(), vec!["ip", "geo", "passes"]);
        assert_eq!(
            fixture.seen_ip.lock().unwrap().as_ref().map(|ip| ip.as_str()),
            Some("5.6.7.8")
        );
    }

    #[tokio::test]
    async fn test_run_with_report_keeps_intermediate_values() {
        let (pipeline, _) = build(Some("5.6.7.8"), Some((40.0, -70.0)), vec![]);

        let report = pipeline.run_with_report().await.unwrap();

        assert_eq!(report.ip.as_str(), "5.6.7.8");
        assert_eq!(report.coordinates, Coordinates::new(40.0, -70.0).unwrap());
        assert!(report.passes.is_empty());
    }

    #[tokio::test]
    async fn test_geo_failure_short_circuits() {
        let (pipeline, fixture) = build(Some("5.6.7.8"), None, vec![PassWindow::new(1, 1)]);

        let err = pipeline.run().await.unwrap_err();

        assert!(matches!(
            err,
            FlyoverError::ServerError {
                stage: Stage::Geolocation,
                status: 500,
                ..
            }
        ));
        assert_eq!(fixture.predictor_calls.load(Ordering::SeqCst), 0);
        assert_eq!(fixture.log.calls(), vec!["ip", "geo"]);
    }

    #[tokio::test]
    async fn test_ip_failure_short_circuits() {
        let (pipeline, fixture) = build(None, Some((40.0, -70.0)), vec![]);

        let err = pipeline.run().await.unwrap_err();

        assert_eq!(err.stage(), Some(Stage::IpLookup));
        assert_eq!(fixture.log.calls(), vec!["ip"]);
        assert!(fixture.seen_ip.lock().unwrap().is_none());
        assert_eq!(fixture.predictor_calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_pipeline_over_shared_resolvers() {
        let log = CallLog::default();
        let calls = Arc::new(AtomicUsize::new(0));
        let pipeline = Arc::new(FlyoverPipeline::new(
            Arc::new(MockIpResolver {
                result: Some("1.1.1.1"),
                log: log.clone(),
            }),
            Arc::new(MockGeoResolver {
                result: Some((1.0, 2.0)),
                seen_ip: Arc::new(Mutex::new(None)),
                log: log.clone(),
            }),
            Arc::new(MockPassPredictor {
                result: vec![PassWindow::new(10, 20)],
                call_count: calls.clone(),
                log: log.clone(),
            }),
        ));

        let handles: Vec<_> = (0..3)
            .map(|_| {
                let pipeline = pipeline.clone();
                tokio::spawn(async move { pipeline.run().await })
            })
            .collect();

        for handle in handles {
            let passes = handle.await.unwrap().unwrap();
            assert_eq!(passes, vec![PassWindow::new(10, 20)]);
        }
        assert_eq!(calls.load(Ordering::SeqCst), 3);
    }

    #[test]
    fn test_from_config_rejects_bad_endpoint() {
        use std::time::Duration;

        struct BadConfig;

        impl ConfigProvider for BadConfig {
            fn ip_endpoint(&self) -> &str {
                "ftp://example.com"
            }

            fn geolocation_endpoint(&self) -> &str {
                "https://ipvigilante.com/"
            }

            fn flyover_endpoint(&self) -> &str {
                "http://api.open-notify.org/iss-pass.json"
            }

            fn request_timeout(&self) -> Duration {
                Duration::from_secs(5)
            }

            fn user_agent(&self) -> &str {
                "test"
            }
        }

        let err = FlyoverPipeline::from_config(&BadConfig).err().unwrap();
        match err {
            FlyoverError::ValidationError { field, .. } => assert_eq!(field, "endpoints.ip"),
            other => panic!("unexpected error: {other:?}"),
        }
    }
}
