//! Capability shapes shared by the binding tests

use ovsdb_typed::binding::{ExpectedType, OperationDecl, OperationKind, ShapeDeclaration, TableShape};
use ovsdb_typed::{BaseKind, Version, VersionRange};

pub struct Bridge;

impl TableShape for Bridge {
    const TABLE: &'static str = "Bridge";
    const DATABASE: Option<&'static str> = Some("Open_vSwitch");

    fn declare(shape: &mut ShapeDeclaration) {
        shape
            .operation(OperationDecl::inferred("getName").expecting(ExpectedType::Scalar(BaseKind::String)))
            .operation(OperationDecl::inferred("setName"))
            .operation(OperationDecl::inferred("getPortsColumn").expecting(ExpectedType::Set(BaseKind::Uuid)))
            .operation(OperationDecl::inferred("setPorts"))
            .operation(OperationDecl::inferred("getOtherConfigColumn"))
            .operation(OperationDecl::explicit("getOtherConfig", OperationKind::GetData, Some("other_config")))
            .operation(OperationDecl::explicit("setOtherConfig", OperationKind::SetData, Some("other_config")))
            .operation(OperationDecl::explicit("externalIds", OperationKind::GetColumn, Some("external_ids")))
            .operation(OperationDecl::inferred("getStpEnable"))
            .operation(OperationDecl::inferred("getRow"))
            .operation(OperationDecl::explicit("getSchema", OperationKind::GetTableSchema, None));
    }
}

pub struct Port;

impl TableShape for Port {
    const TABLE: &'static str = "Port";

    fn declare(shape: &mut ShapeDeclaration) {
        shape
            .operation(OperationDecl::inferred("getName"))
            .operation(OperationDecl::inferred("getTagColumn"))
            .operation(OperationDecl::inferred("setTag"))
            .operation(
                OperationDecl::explicit("getBondMode", OperationKind::GetData, Some("bond_mode"))
                    .versions(VersionRange::at_least(Version::new(7, 1, 0))),
            )
            .operation(
                OperationDecl::explicit("getQos", OperationKind::GetData, Some("qos"))
                    .versions(VersionRange::closed_open(Version::new(6, 0, 0), Version::new(7, 0, 0))),
            )
            .operation(OperationDecl::inferred("getPortRow"));
    }
}

pub struct Interface;

impl TableShape for Interface {
    const TABLE: &'static str = "Interface";

    fn declare(shape: &mut ShapeDeclaration) {
        shape
            .operation(OperationDecl::inferred("getName"))
            .operation(OperationDecl::inferred("getOfport"))
            .operation(
                OperationDecl::explicit("getLinkSpeed", OperationKind::GetData, Some("link_speed"))
                    .versions(VersionRange::at_least(Version::new(7, 2, 0))),
            )
            .operation(
                OperationDecl::inferred("getStatistics")
                    .expecting(ExpectedType::Map(BaseKind::String, BaseKind::Integer)),
            );
    }
}

/// Shape over a table the fixture does not have
pub struct Controller;

impl TableShape for Controller {
    const TABLE: &'static str = "Controller";

    fn declare(shape: &mut ShapeDeclaration) {
        shape
            .operation(OperationDecl::inferred("getTarget"))
            .operation(OperationDecl::explicit("getSchema", OperationKind::GetTableSchema, None))
            .operation(OperationDecl::inferred("getRow"));
    }
}

/// Shape only supported by newer schemas
pub struct FlowSampleCollectorSet;

impl TableShape for FlowSampleCollectorSet {
    const TABLE: &'static str = "Flow_Sample_Collector_Set";
    const VERSIONS: VersionRange = VersionRange::at_least(Version::new(7, 1, 0));

    fn declare(shape: &mut ShapeDeclaration) {
        shape.operation(OperationDecl::inferred("getId"));
    }
}

/// Shape of another database
pub struct PhysicalSwitch;

impl TableShape for PhysicalSwitch {
    const TABLE: &'static str = "Physical_Switch";
    const DATABASE: Option<&'static str> = Some("hardware_vtep");

    fn declare(shape: &mut ShapeDeclaration) {
        shape.operation(OperationDecl::inferred("getName"));
    }
}

/// Shape with an operation no convention matches
pub struct Misdeclared;

impl TableShape for Misdeclared {
    const TABLE: &'static str = "Bridge";

    fn declare(shape: &mut ShapeDeclaration) {
        shape
            .operation(OperationDecl::inferred("getName"))
            .operation(OperationDecl::inferred("bridgeName"));
    }
}
