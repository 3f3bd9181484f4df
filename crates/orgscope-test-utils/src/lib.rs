//! Testing utilities for orgscope workspace
//!
//! Shared fixture trees and builders.

#![allow(missing_docs)]

use orgscope_tree::{
    AssetGroupNode, BusinessUnitNode, CompanyNode, CompositeId, FlatTree, NodeKind, RegionNode,
    RoleNode, SiteNode, TreeNode, WorkGroupNode,
};

pub fn company(id: i64, name: &str, children: impl IntoIterator<Item = BusinessUnitNode>) -> TreeNode {
    CompanyNode::new(id, name).with_children(children).into()
}

pub fn business_unit(id: i64, name: &str, children: impl IntoIterator<Item = RegionNode>) -> BusinessUnitNode {
    BusinessUnitNode::new(id, name).with_children(children)
}

pub fn region(id: i64, name: &str, children: impl IntoIterator<Item = SiteNode>) -> RegionNode {
    RegionNode::new(id, name).with_children(children)
}

pub fn site(id: i64, name: &str, children: impl IntoIterator<Item = AssetGroupNode>) -> SiteNode {
    SiteNode::new(id, name).with_children(children)
}

pub fn asset_group(id: i64, name: &str, children: impl IntoIterator<Item = WorkGroupNode>) -> AssetGroupNode {
    AssetGroupNode::new(id, name).with_children(children)
}

pub fn work_group(id: i64, name: &str, children: impl IntoIterator<Item = RoleNode>) -> WorkGroupNode {
    WorkGroupNode::new(id, name).with_children(children)
}

pub fn role(id: i64, name: &str) -> RoleNode {
    RoleNode::new(id, name)
}

pub fn role_with_reports(id: i64, name: &str, reports: impl IntoIterator<Item = RoleNode>) -> RoleNode {
    RoleNode::new(id, name).with_children(reports)
}

pub fn id(kind: NodeKind, numeric_id: i64) -> CompositeId {
    CompositeId::new(kind, numeric_id)
}

/// `company(1) > business_unit(1) > region(1) > site(1) > asset_group(1) > work_group(1) > role(10), role(11)`
pub fn leaf_only_tree() -> TreeNode {
    company(
        1,
        "Acme",
        [business_unit(
            1,
            "Operations",
            [region(
                1,
                "North",
                [site(
                    1,
                    "Plant A",
                    [asset_group(
                        1,
                        "Crushers",
                        [work_group(1, "Day Shift", [role(10, "Operator"), role(11, "Fitter")])],
                    )],
                )],
            )],
        )],
    )
}

/// A region and a work group sharing id 7, and a site and role sharing id 5
pub fn collision_tree() -> TreeNode {
    company(
        1,
        "Acme",
        [business_unit(
            1,
            "Operations",
            [region(
                7,
                "West",
                [site(
                    5,
                    "Mill",
                    [asset_group(
                        2,
                        "Conveyors",
                        [work_group(7, "Maintenance", [role(5, "Electrician")])],
                    )],
                )],
            )],
        )],
    )
}

/// Seven-level tree with two business units, empty branches and reporting roles
///
/// Roles: 100..=105 under `site-10`, 200 under `site-20`; `region-3` and
/// `asset_group-31` have no roles at all.
pub fn sample_tree() -> TreeNode {
    company(
        1,
        "Acme Resources",
        [
            business_unit(
                1,
                "Mining",
                [
                    region(
                        1,
                        "Pilbara",
                        [site(
                            10,
                            "Tom Price",
                            [
                                asset_group(
                                    11,
                                    "Fixed Plant",
                                    [
                                        work_group(
                                            12,
                                            "Processing",
                                            [
                                                role_with_reports(
                                                    100,
                                                    "Plant Supervisor",
                                                    [role(101, "Plant Operator"), role(102, "Control Room Operator")],
                                                ),
                                                role(103, "Metallurgist"),
                                            ],
                                        ),
                                        work_group(13, "Maintenance", [role(104, "Mechanical Fitter")]),
                                    ],
                                ),
                                asset_group(14, "Mobile Fleet", [work_group(15, "Haulage", [role(105, "Haul Truck Driver")])]),
                            ],
                        )],
                    ),
                    region(3, "Goldfields", []),
                ],
            ),
            business_unit(
                2,
                "Rail",
                [region(
                    2,
                    "Coastal",
                    [site(
                        20,
                        "Port Yard",
                        [
                            asset_group(21, "Rolling Stock", [work_group(22, "Train Crew", [role(200, "Train Driver")])]),
                            asset_group(31, "Signals", []),
                        ],
                    )],
                )],
            ),
        ],
    )
}

/// Build a uniform tree; every level numbers its nodes from 1, so ids collide
/// across levels on purpose.
pub fn uniform_tree(fanout: [usize; 7]) -> TreeNode {
    let mut ids = [0i64; 7];
    let mut next = |rank: usize| {
        ids[rank] += 1;
        ids[rank]
    };

    let mut company = CompanyNode::new(next(0), "Company");
    for _ in 0..fanout[1] {
        let mut bu = BusinessUnitNode::new(next(1), "BU");
        for _ in 0..fanout[2] {
            let mut region = RegionNode::new(next(2), "Region");
            for _ in 0..fanout[3] {
                let mut site = SiteNode::new(next(3), "Site");
                for _ in 0..fanout[4] {
                    let mut group = AssetGroupNode::new(next(4), "Assets");
                    for _ in 0..fanout[5] {
                        let mut crew = WorkGroupNode::new(next(5), "Crew");
                        for _ in 0..fanout[6] {
                            let mut lead = RoleNode::new(next(6), "Lead");
                            for _ in 0..fanout[6] {
                                lead.reporting_roles.push(RoleNode::new(next(6), "Report"));
                            }
                            crew.roles.push(lead);
                        }
                        group.work_groups.push(crew);
                    }
                    site.asset_groups.push(group);
                }
                region.sites.push(site);
            }
            bu.regions.push(region);
        }
        company.business_units.push(bu);
    }
    company.into()
}

pub fn uniform_node_count(fanout: [usize; 7]) -> usize {
    let mut total = 1;
    let mut width = 1;
    for f in &fanout[1..6] {
        width *= f;
        total += width;
    }
    // Each work group holds f leads with f reports each
    let roles = width * fanout[6] * (1 + fanout[6]);
    total + roles
}

pub fn flat(tree: &TreeNode) -> FlatTree {
    orgscope_tree::flatten(tree).expect("fixture tree flattens")
}
