use std::net::IpAddr;

use poem::Request;

use super::request_id::RequestId;

/// Request context that flows from the API layer into coordinators
///
/// Carries what the coordinators attach to their log lines.
#[derive(Debug, Clone, PartialEq)]
pub struct RequestContext {
    /// IP address of the client making the request
    pub ip_address: Option<IpAddr>,

    /// Unique identifier for this request (for tracing across layers)
    pub request_id: RequestId,

    /// Who initiated the operation
    pub actor_id: String,
}

impl RequestContext {
    /// Create a RequestContext for an incoming HTTP request
    pub fn from_request(req: &Request) -> Self {
        let ip_address = Self::extract_ip_address(req);
        Self {
            ip_address,
            request_id: RequestId::new(),
            actor_id: match ip_address {
                Some(ip) => format!("api:{}", ip),
                None => "api:unknown".to_string(),
            },
        }
    }

    /// Extract the client IP address
    ///
    /// Checks `X-Forwarded-For` (first hop), then `X-Real-IP`, then the peer
    /// address of the connection.
    pub fn extract_ip_address(req: &Request) -> Option<IpAddr> {
        if let Some(forwarded) = req.header("X-Forwarded-For") {
            if let Some(ip) = forwarded.split(',').next() {
                if let Ok(ip) = ip.trim().parse() {
                    return Some(ip);
                }
            }
        }

        if let Some(real_ip) = req.header("X-Real-IP") {
            if let Ok(ip) = real_ip.trim().parse() {
                return Some(ip);
            }
        }

        req.remote_addr().as_socket_addr().map(|addr| addr.ip())
    }
}
