//! Topology builder: entities in, CI graph out

use tracing::{debug, info};

use super::graph::{CiEdge, CiGraph, CiKind, CiNode, EdgeKind};
use super::ids::{
    config_id, device_id, interface_id, module_id, physical_port_id, sha256_hex, vlan_id,
};
use super::layer2;
use crate::context::DiscoveryContext;
use crate::error::DataQualityIssue;
use crate::model::{Device, EntityKind, Port, PortRef};
use crate::roles::PortCategory;

/// Optional parts of the graph
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuildOptions {
    pub report_physical_ports: bool,
    pub report_vlans: bool,
    pub report_layer2: bool,
}

impl Default for BuildOptions {
    fn default() -> Self {
        Self {
            report_physical_ports: true,
            report_vlans: true,
            report_layer2: true,
        }
    }
}

impl BuildOptions {
    #[must_use]
    pub fn with_physical_ports(mut self, enabled: bool) -> Self {
        self.report_physical_ports = enabled;
        self
    }

    #[must_use]
    pub fn with_vlans(mut self, enabled: bool) -> Self {
        self.report_vlans = enabled;
        self
    }

    #[must_use]
    pub fn with_layer2(mut self, enabled: bool) -> Self {
        self.report_layer2 = enabled;
        self
    }
}

/// The built graph plus the data-quality issues met while building it
#[derive(Debug, Clone, Default)]
pub struct BuildOutput {
    pub graph: CiGraph,
    pub issues: Vec<DataQualityIssue>,
}

/// Builds the CI graph from a discovery context
///
/// Building never fails: entities or edges that cannot be represented are
/// left out and reported in [`BuildOutput::issues`].
pub struct TopologyBuilder<'a> {
    context: &'a DiscoveryContext,
    options: BuildOptions,
    graph: CiGraph,
    issues: Vec<DataQualityIssue>,
}

impl<'a> TopologyBuilder<'a> {
    #[must_use]
    pub fn new(context: &'a DiscoveryContext) -> Self {
        Self {
            context,
            options: BuildOptions::default(),
            graph: CiGraph::new(),
            issues: Vec::new(),
        }
    }

    #[must_use]
    pub fn with_options(mut self, options: BuildOptions) -> Self {
        self.options = options;
        self
    }

    /// Build the graph
    #[must_use]
    pub fn build(mut self) -> BuildOutput {
        let context = self.context;

        for device in context.devices() {
            self.build_device(device);
            for port in device.ports.values() {
                self.build_port(device, port);
            }
        }

        // Role edges point at other ports' interfaces, so every interface
        // must exist first
        for port in context.ports() {
            self.link_roles(port);
        }

        if self.options.report_vlans {
            for device in context.devices() {
                self.build_vlans(device);
            }
            for port in context.ports() {
                self.link_vlans(port);
            }
        }

        if self.options.report_layer2 {
            layer2::synthesize(context, &mut self.graph, &mut self.issues);
        }

        self.issues.extend(context.unresolved_issues());

        info!(
            "Built topology: {} nodes, {} edges, {} data-quality issues",
            self.graph.node_count(),
            self.graph.edge_count(),
            self.issues.len()
        );

        BuildOutput {
            graph: self.graph,
            issues: self.issues,
        }
    }

    fn build_device(&mut self, device: &Device) {
        let id = device_id(&device.key);
        let attrs = &device.attributes;
        self.graph.add_node(
            CiNode::new(&id, CiKind::Device)
                .with_attr("source_id", device.source_id.as_ref())
                .with_attr("name", attrs.name.as_ref())
                .with_attr("device_type", attrs.device_type.as_ref())
                .with_attr("vendor", attrs.vendor.as_ref())
                .with_attr("model", attrs.model.as_ref())
                .with_attr("serial", attrs.serial.as_ref())
                .with_attr("version", attrs.version.as_ref())
                .with_attr("memory_bytes", attrs.memory_bytes)
                .with_attr("ip_address", attrs.ip_address),
        );
        if device.is_placeholder() {
            self.graph.mark_provisional(&id);
        }

        for module in device.modules.values() {
            let module_node = module_id(&device.key, &module.slot);
            self.graph.add_node(
                CiNode::new(&module_node, CiKind::Module)
                    .with_attr("slot", Some(&module.slot))
                    .with_attr("model", module.attributes.model.as_ref())
                    .with_attr("serial", module.attributes.serial.as_ref())
                    .with_attr("firmware", module.attributes.firmware.as_ref()),
            );
            self.graph
                .add_edge(CiEdge::new(EdgeKind::Containment, &id, module_node));
        }

        if let Some(config) = &device.config {
            let config_node = config_id(&device.key);
            self.graph.add_node(
                CiNode::new(&config_node, CiKind::Config)
                    .with_attr("content_hash", Some(sha256_hex(&config.content)))
                    .with_attr("content", Some(&config.content))
                    .with_attr("last_modified", config.last_modified.map(|t| t.to_rfc3339())),
            );
            self.graph
                .add_edge(CiEdge::new(EdgeKind::Containment, &id, config_node));
        }
    }

    fn build_port(&mut self, device: &Device, port: &Port) {
        let port_ref = port.reference();
        let interface = interface_id(&port_ref);
        let attrs = &port.attributes;
        let category = port.category();

        self.graph.add_node(
            CiNode::new(&interface, CiKind::Interface)
                .with_attr("source_id", port.source_id.as_ref())
                .with_attr("name", attrs.name.as_ref())
                .with_attr("mac_address", attrs.mac)
                .with_attr("port_type", attrs.port_type.as_ref())
                .with_attr("state", attrs.state.as_ref())
                .with_attr("status", attrs.status.as_ref())
                .with_attr("category", Some(category_name(category))),
        );
        self.graph.add_edge(CiEdge::new(
            EdgeKind::Containment,
            device_id(&device.key),
            &interface,
        ));

        if category != PortCategory::Regular || !self.options.report_physical_ports {
            return;
        }

        let Some(index) = port.index() else {
            debug!("Port {} has no board/port index; no physical port built", port_ref);
            self.issues.push(DataQualityIssue::UnparseablePortIndex {
                port: port_ref.to_string(),
                location: attrs.physical_location.clone(),
            });
            return;
        };

        let physical = physical_port_id(&port_ref);
        self.graph.add_node(
            CiNode::new(&physical, CiKind::PhysicalPort)
                .with_attr("board_index", Some(index.board))
                .with_attr("port_index", Some(index.port))
                .with_attr("slot", attrs.slot.as_ref())
                .with_attr("physical_location", attrs.physical_location.as_ref()),
        );

        let container = match device.module_for(port) {
            Some(module) => module_id(&device.key, &module.slot),
            None => device_id(&device.key),
        };
        self.graph
            .add_edge(CiEdge::new(EdgeKind::Containment, container, &physical));
        self.graph
            .add_edge(CiEdge::new(EdgeKind::Realization, physical, interface));
    }

    fn link_roles(&mut self, port: &Port) {
        let interface = interface_id(&port.reference());

        match port.category() {
            PortCategory::Regular => {}
            PortCategory::Alias => {
                let Some(role) = port.roles().alias() else {
                    return;
                };
                let parent = interface_id(&role.parent);
                // Both directions are reported
                let forward = self.graph.add_edge(CiEdge::new(
                    EdgeKind::Realization,
                    &parent,
                    &interface,
                ));
                self.graph
                    .add_edge(CiEdge::new(EdgeKind::Realization, &interface, &parent));
                if !forward && !self.graph.contains_node(&parent) {
                    self.issues.push(DataQualityIssue::UnresolvedPort {
                        port: role.parent.to_string(),
                        context: EntityKind::Alias,
                    });
                }
            }
            PortCategory::Channel => {
                let Some(role) = port.roles().channel() else {
                    return;
                };
                for member in role.members() {
                    self.graph.add_edge(CiEdge::new(
                        EdgeKind::Membership,
                        &interface,
                        interface_id(member),
                    ));
                }
            }
        }
    }

    fn build_vlans(&mut self, device: &Device) {
        for vlan in device.vlans.values() {
            let id = vlan_id(&device.key, vlan.tag);
            self.graph.add_node(
                CiNode::new(&id, CiKind::Vlan)
                    .with_attr("vlan_id", Some(vlan.tag))
                    .with_attr("name", vlan.attributes.name.as_ref())
                    .with_attr("status", vlan.attributes.status.as_ref())
                    .with_attr("mtu", vlan.attributes.mtu),
            );
            self.graph.add_edge(CiEdge::new(
                EdgeKind::Containment,
                device_id(&device.key),
                id,
            ));
        }
    }

    fn link_vlans(&mut self, port: &Port) {
        let Some(role) = port.roles().vlans() else {
            return;
        };

        let targets = vlan_targets(port);
        for vlan in role.vlans() {
            let vlan_node = vlan_id(&vlan.device, vlan.tag);
            for target in &targets {
                let representation = self.representation(target);
                self.graph.add_edge(CiEdge::new(
                    EdgeKind::Membership,
                    &vlan_node,
                    representation,
                ));
            }
        }
    }

    /// Physical port of a target when one was built, else its interface
    fn representation(&self, port: &PortRef) -> String {
        let physical = physical_port_id(port);
        if self.graph.contains_node(&physical) {
            physical
        } else {
            interface_id(port)
        }
    }
}

/// Ports a VLAN-bearing port's memberships really belong to
fn vlan_targets(port: &Port) -> Vec<PortRef> {
    match port.category() {
        PortCategory::Regular => vec![port.reference()],
        PortCategory::Alias => port
            .roles()
            .alias()
            .map(|role| vec![role.parent.clone()])
            .unwrap_or_default(),
        PortCategory::Channel => port
            .roles()
            .channel()
            .map(|role| role.members().to_vec())
            .unwrap_or_default(),
    }
}

fn category_name(category: PortCategory) -> &'static str {
    match category {
        PortCategory::Regular => "regular",
        PortCategory::Alias => "alias",
        PortCategory::Channel => "channel",
    }
}
