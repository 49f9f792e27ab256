//! Tests for role attachment rules

use crate::error::DataQualityIssue;
use crate::model::{PortRef, VlanRef, VlanTag};
use crate::roles::{
    AliasPortRole, PortCategory, PortChannelRole, Role, RoleError, RoleKind, RoleSet,
    VlanPortRole,
};

fn alias_of(port: &str) -> Role {
    Role::Alias(AliasPortRole {
        parent: PortRef::new("sw1", port),
    })
}

fn vlan(tag: u16) -> VlanRef {
    VlanRef {
        device: "sw1".to_string(),
        tag: VlanTag::new(tag).unwrap(),
    }
}

#[test]
fn test_each_kind_attaches_once() {
    let mut roles = RoleSet::default();
    roles.add(alias_of("p1")).unwrap();

    assert_eq!(
        roles.add(alias_of("p2")),
        Err(RoleError::AlreadyAttached(RoleKind::Alias))
    );
    assert_eq!(roles.alias().map(|r| r.parent.port.as_str()), Some("p1"));
}

#[test]
fn test_alias_and_channel_are_exclusive() {
    let mut alias = RoleSet::default();
    alias.add(alias_of("p1")).unwrap();
    assert_eq!(
        alias.add(Role::Channel(PortChannelRole::default())),
        Err(RoleError::Conflict {
            existing: RoleKind::Alias,
            requested: RoleKind::Channel,
        })
    );
    assert!(!alias.has(RoleKind::Channel));

    let mut channel = RoleSet::default();
    channel
        .add(Role::Channel(PortChannelRole::default()))
        .unwrap();
    assert!(channel.add(alias_of("p1")).is_err());
    assert_eq!(channel.category(), PortCategory::Channel);
}

#[test]
fn test_vlan_combines_with_alias_or_channel() {
    let mut roles = RoleSet::default();
    roles.add(alias_of("p1")).unwrap();
    roles.add(Role::Vlan(VlanPortRole::new([vlan(10)]))).unwrap();

    assert_eq!(roles.category(), PortCategory::Alias);
    assert_eq!(
        roles.kinds().collect::<Vec<_>>(),
        vec![RoleKind::Alias, RoleKind::Vlan]
    );
}

#[test]
fn test_channel_members_are_deduplicated() {
    let mut role = PortChannelRole::new([PortRef::new("sw1", "p1"), PortRef::new("sw1", "p2")]);
    assert!(!role.add_member(PortRef::new("sw1", "p1")));
    assert!(role.add_member(PortRef::new("sw1", "p3")));
    assert_eq!(role.members().len(), 3);
    assert_eq!(role.members()[0].port, "p1");
}

#[test]
fn test_vlan_role_keeps_one_entry_per_tag() {
    let mut role = VlanPortRole::new([vlan(10), vlan(20)]);
    assert!(!role.add_vlan(vlan(10)));
    assert_eq!(role.len(), 2);
    assert!(!role.is_empty());
}

#[test]
fn test_role_error_into_issue() {
    let issue = RoleError::AlreadyAttached(RoleKind::Alias).into_issue("sw1/p1");
    assert_eq!(
        issue,
        DataQualityIssue::DuplicateRole {
            port: "sw1/p1".to_string(),
            kind: RoleKind::Alias,
        }
    );
}
