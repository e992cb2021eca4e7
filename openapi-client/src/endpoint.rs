//! Endpoint resolution for a product in a region.

use crate::error::RpcError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EndpointStyle {
    /// `{product}.{region}.aliyuncs.com`
    Regional,
    /// `{product}.aliyuncs.com`
    Central,
}

/// Static per-product endpoint data.
#[derive(Debug, Clone, Copy)]
pub struct EndpointRule {
    pub product_id: &'static str,
    pub style: EndpointStyle,
    /// Region overrides, consulted before the rule.
    pub endpoint_map: &'static [(&'static str, &'static str)],
}

impl EndpointRule {
    /// Explicit endpoint first, then the region map, then the rule.
    pub fn resolve(
        &self,
        region_id: &str,
        network: Option<&str>,
        suffix: Option<&str>,
        explicit: Option<&str>,
    ) -> Result<String, RpcError> {
        if let Some(endpoint) = explicit.filter(|e| !e.trim().is_empty()) {
            return Ok(endpoint.to_string());
        }

        if let Some((_, endpoint)) = self
            .endpoint_map
            .iter()
            .find(|(region, _)| *region == region_id)
        {
            return Ok((*endpoint).to_string());
        }

        if self.product_id.is_empty() {
            return Err(RpcError::Endpoint("product id is empty".to_string()));
        }

        let mut host = self.product_id.to_lowercase();
        if let Some(network) = network.filter(|n| !n.is_empty() && *n != "public") {
            host.push('-');
            host.push_str(network);
        }
        if let Some(suffix) = suffix.filter(|s| !s.is_empty()) {
            host.push('-');
            host.push_str(suffix);
        }

        match self.style {
            EndpointStyle::Central => Ok(format!("{}.aliyuncs.com", host)),
            EndpointStyle::Regional => {
                if region_id.trim().is_empty() {
                    return Err(RpcError::Endpoint(format!(
                        "region id is required to resolve the {} endpoint",
                        self.product_id
                    )));
                }
                Ok(format!("{}.{}.aliyuncs.com", host, region_id))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const REGIONAL: EndpointRule = EndpointRule {
        product_id: "Ecs",
        style: EndpointStyle::Regional,
        endpoint_map: &[("cn-hangzhou", "ecs.aliyuncs.com")],
    };

    #[test]
    fn explicit_endpoint_wins() {
        let endpoint = REGIONAL
            .resolve("cn-hangzhou", None, None, Some("localhost:8080"))
            .unwrap();
        assert_eq!(endpoint, "localhost:8080");
    }

    #[test]
    fn region_map_precedes_rule() {
        let endpoint = REGIONAL.resolve("cn-hangzhou", None, None, None).unwrap();
        assert_eq!(endpoint, "ecs.aliyuncs.com");
    }

    #[test]
    fn regional_rule_includes_network_and_suffix() {
        let endpoint = REGIONAL
            .resolve("eu-central-1", Some("vpc"), Some("share"), None)
            .unwrap();
        assert_eq!(endpoint, "ecs-vpc-share.eu-central-1.aliyuncs.com");
    }

    #[test]
    fn regional_rule_without_region_fails() {
        assert!(matches!(
            REGIONAL.resolve("", None, None, None),
            Err(RpcError::Endpoint(_))
        ));
    }

    #[test]
    fn central_rule_ignores_region() {
        let rule = EndpointRule {
            product_id: "Cbn",
            style: EndpointStyle::Central,
            endpoint_map: &[],
        };
        assert_eq!(
            rule.resolve("ap-southeast-1", Some("public"), None, None).unwrap(),
            "cbn.aliyuncs.com"
        );
    }
}
