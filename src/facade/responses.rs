//! JSON response bodies for the HTTP surface (§6.2).

use serde::Serialize;

#[derive(Serialize)]
pub struct RouteResponse {
    pub dst: String,
    pub nh: String,
}

#[derive(Serialize)]
pub struct MetricUpdateResponse {
    pub status: &'static str,
    pub updated_routes: usize,
}

#[derive(Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub routes_loaded: usize,
    pub radix_tree_routes: usize,
}

#[derive(Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

#[derive(Serialize)]
pub struct RouteDoc {
    pub method: &'static str,
    pub path: &'static str,
    pub purpose: &'static str,
}

#[derive(Serialize)]
pub struct DocsResponse {
    pub service: &'static str,
    pub routes: Vec<RouteDoc>,
}

impl Default for DocsResponse {
    fn default() -> Self {
        DocsResponse {
            service: "radix-route-store",
            routes: vec![
                RouteDoc {
                    method: "GET",
                    path: "/health",
                    purpose: "report load status and route counts",
                },
                RouteDoc {
                    method: "GET",
                    path: "/destination/{prefix}",
                    purpose: "longest-prefix-match lookup for an address or CIDR",
                },
                RouteDoc {
                    method: "PUT",
                    path: "/prefix/{prefix}/nh/{nh}/metric/{metric}",
                    purpose: "update matching routes' metric (implicit orlonger match)",
                },
                RouteDoc {
                    method: "PUT",
                    path: "/prefix/{prefix}/nh/{nh}/metric/{metric}/match/{matchd}",
                    purpose: "update matching routes' metric under an explicit match mode",
                },
            ],
        }
    }
}
