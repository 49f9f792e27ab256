//! Tests for ports and their physical index

use rstest::rstest;

use crate::model::{MacAddress, Port, PortAttributes, PortIndex, PortRef};
use crate::roles::{AliasPortRole, PortCategory, PortChannelRole, Role, RoleError, RoleKind};

#[rstest]
#[case(Some("2/14"), None, Some((2, 14)))]
#[case(Some("Gi1/0/24"), None, Some((1, 24)))]
#[case(Some("Slot 3 Port 7"), None, Some((3, 7)))]
#[case(Some("port 9"), Some("4"), Some((4, 9)))]
#[case(Some("port 9"), None, None)]
#[case(Some("uplink"), Some("1"), None)]
#[case(None, Some("1"), None)]
fn test_port_index_derive(
    #[case] location: Option<&str>,
    #[case] slot: Option<&str>,
    #[case] expected: Option<(u32, u32)>,
) {
    let index = PortIndex::derive(location, slot).map(|i| (i.board, i.port));
    assert_eq!(index, expected);
}

#[test]
fn test_port_ref_display() {
    let port = PortRef::new("sw1", "p7");
    assert_eq!(port.to_string(), "sw1/p7");
}

#[test]
fn test_absorb_never_downgrades() {
    let mut port = Port::new("sw1", "p1");
    let first = port.absorb(PortAttributes {
        name: Some("Gi1/0/1".to_string()),
        mac: Some(MacAddress::parse("001122334455").unwrap()),
        ..PortAttributes::default()
    });
    assert!(first);

    let second = port.absorb(PortAttributes {
        name: Some("  ".to_string()),
        state: Some("up".to_string()),
        ..PortAttributes::default()
    });
    assert!(second);
    assert_eq!(port.attributes.name.as_deref(), Some("Gi1/0/1"));
    assert_eq!(port.attributes.state.as_deref(), Some("up"));
    assert!(port.attributes.mac.is_some());

    let third = port.absorb(PortAttributes::default());
    assert!(!third);
}

#[test]
fn test_absorb_derives_index_once_location_arrives() {
    let mut port = Port::new("sw1", "p1");
    port.absorb(PortAttributes::default());
    assert_eq!(port.index(), None);

    port.absorb(PortAttributes {
        physical_location: Some("1/3".to_string()),
        ..PortAttributes::default()
    });
    assert_eq!(port.index(), Some(PortIndex { board: 1, port: 3 }));
}

#[test]
fn test_port_category_follows_roles() {
    let mut port = Port::new("sw1", "po1");
    assert_eq!(port.category(), PortCategory::Regular);

    port.add_role(Role::Channel(PortChannelRole::new([PortRef::new("sw1", "p1")])))
        .unwrap();
    assert_eq!(port.category(), PortCategory::Channel);
    assert!(port.has_role(RoleKind::Channel));

    let err = port
        .add_role(Role::Alias(AliasPortRole {
            parent: PortRef::new("sw1", "p2"),
        }))
        .unwrap_err();
    assert_eq!(
        err,
        RoleError::Conflict {
            existing: RoleKind::Channel,
            requested: RoleKind::Alias
        }
    );
    assert_eq!(port.category(), PortCategory::Channel);
}
