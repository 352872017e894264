//! Built-in flag catalogs.

use bootcfg_kernel::domain::{CatalogSpec, FlagDescriptor, FlagKind, Relationship};

/// Candidate profile of the ZynqMP board U-Boot header (USB host, gadget and DWC3 controller).
pub const ZYNQMP_USB_PROFILE: &str = include_str!("../profiles/zynqmp-usb.toml");

/// U-Boot USB stack: host, driver-model and gadget support plus the DWC3 controller.
///
/// Gadget mode needs a controller driver; `usb_dwc3_gadget` is the one backend declared here and
/// provides the `gadget_controller` capability.
#[must_use]
pub fn uboot_usb() -> CatalogSpec {
    use FlagKind::{Integer, Presence};

    let presence = |id: &str, help: &str| FlagDescriptor::new(id, Presence).with_help(help);

    CatalogSpec::new()
        .flag(presence("usb", "USB support"))
        .flag(presence("dm_usb", "Driver-model USB"))
        .flag(presence("dm_usb_gadget", "Driver-model USB gadget"))
        .flag(presence("usb_storage", "USB mass storage"))
        .flag(presence("usb_gadget", "USB gadget (peripheral) mode"))
        .flag(presence("usb_gadget_download", "USB download gadget (DFU, fastboot)"))
        .flag(presence("usb_dwc3", "Synopsys DWC3 controller"))
        .flag(presence("usb_dwc3_gadget", "DWC3 peripheral mode"))
        .flag(presence("gadget_controller", "Any controller able to run in peripheral mode"))
        .flag(
            FlagDescriptor::new("usb_gadget_manufacturer", FlagKind::String)
                .with_default("U-Boot")
                .with_help("Vendor string reported by the gadget"),
        )
        .flag(
            FlagDescriptor::new("usb_gadget_vendor_num", Integer)
                .with_default(0)
                .with_help("USB vendor ID of the gadget"),
        )
        .flag(
            FlagDescriptor::new("usb_gadget_product_num", Integer)
                .with_default(0)
                .with_help("USB product ID of the gadget"),
        )
        .flag(
            FlagDescriptor::new("usb_gadget_vbus_draw", Integer)
                .with_default(2)
                .with_help("Maximum VBUS current draw in mA"),
        )
        .relation(Relationship::requires("dm_usb", "usb"))
        .relation(Relationship::requires("usb_storage", "usb"))
        .relation(Relationship::requires("usb_gadget", "usb"))
        .relation(Relationship::requires("usb_gadget", "gadget_controller"))
        .relation(Relationship::requires("dm_usb_gadget", "dm_usb"))
        .relation(Relationship::requires("dm_usb_gadget", "usb_gadget"))
        .relation(Relationship::requires("usb_gadget_download", "usb_gadget"))
        .relation(Relationship::requires("usb_gadget_manufacturer", "usb_gadget"))
        .relation(Relationship::requires("usb_gadget_vendor_num", "usb_gadget"))
        .relation(Relationship::requires("usb_gadget_product_num", "usb_gadget"))
        .relation(Relationship::requires("usb_gadget_vbus_draw", "usb_gadget"))
        .relation(Relationship::requires("usb_dwc3", "usb"))
        .relation(Relationship::requires("usb_dwc3_gadget", "usb_dwc3"))
        .relation(Relationship::provides("usb_dwc3_gadget", "gadget_controller"))
}
