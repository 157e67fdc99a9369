//! Attribute tables of the concrete catalog variants.
//!
//! Import paths follow the layout of the open hardware database documents,
//! for example `cores.performance` for a CPU's performance-core count.

use super::fields::attributes;

attributes! {
  /// Metadata shared by every catalog entry, besides its name and identifiers.
  pub struct ProductInfo {
    manufacturer: Option<String> => "metadata.manufacturer", "Manufacturer";
    part_numbers: Vec<String> => "metadata.part_numbers", "Part Numbers";
    series: Option<String> => "metadata.series", "Series";
    variant: Option<String> => "metadata.variant", "Variant";
    release_year: Option<i64> => "metadata.releaseYear", "Release Year";
    amazon_sku: Option<String> => "", "Amazon SKU";
    newegg_sku: Option<String> => "", "Newegg SKU";
    bestbuy_sku: Option<String> => "", "Best Buy SKU";
    walmart_sku: Option<String> => "", "Walmart SKU";
    adorama_sku: Option<String> => "", "Adorama SKU";
    manufacturer_url: Option<String> => "", "Manufacturer URL";
  }
  filter: []
}

attributes! {
  /// Processor attributes. Clocks are in MHz, cache sizes in MB.
  pub struct CpuSpecs {
    microarchitecture: Option<String> => "microarchitecture", "Microarchitecture";
    core_family: Option<String> => "coreFamily", "Core Family";
    socket: Option<String> => "socket", "Socket";

    cores_tot: Option<i64> => "cores.total", "Total Cores";
    cores_perf: Option<i64> => "cores.performance", "Performance Cores";
    cores_eff: Option<i64> => "cores.efficiency", "Efficiency Cores";
    threads: Option<i64> => "cores.threads", "Threads";

    clocks_perf_base: Option<i64> => "clocks.performance.base", "Performance Base Clock";
    clocks_perf_boost: Option<i64> => "clocks.performance.boost", "Performance Boost Clock";
    clocks_eff_base: Option<i64> => "clocks.efficiency.base", "Efficiency Base Clock";
    clocks_eff_boost: Option<i64> => "clocks.efficiency.boost", "Efficiency Boost Clock";

    // L1 is described as a layout string ("8 x 48 KB"), not a size.
    cache_l1: Option<String> => "cache.l1", "L1 Cache";
    cache_l2: Option<i64> => "cache.l2", "L2 Cache";
    cache_l3: Option<i64> => "cache.l3", "L3 Cache";

    tdp: Option<i64> => "specifications.tdp", "TDP";

    intgraph_model: Option<String> => "specifications.integratedGraphics.model", "Integrated Graphics";
    intgraph_base_clock: Option<i64> => "specifications.integratedGraphics.baseClock", "iGPU Base Clock";
    intgraph_boost_clock: Option<i64> => "specifications.integratedGraphics.boostClock", "iGPU Boost Clock";
    intgraph_shader_count: Option<i64> => "specifications.integratedGraphics.shaderCount", "iGPU Shaders";

    ecc_support: Option<bool> => "specifications.eccSupport", "ECC Support";
    includes_cooler: Option<bool> => "specifications.includesCooler", "Includes Cooler";
    packaging: Option<String> => "specifications.packaging", "Packaging";
    lithography: Option<String> => "specifications.lithography", "Lithography";
    simul_multithread: Option<bool> => "specifications.simultaneousMultithreading", "SMT";

    mem_max_support: Option<i64> => "specifications.memory.maxSupport", "Max Memory (GB)";
    mem_types: Vec<String> => "specifications.memory.types", "Memory Types";
    mem_channels: Option<i64> => "specifications.memory.channels", "Memory Channels";
  }
  filter: [
    "manufacturer",
    "socket",
    "microarchitecture",
    "cores_tot",
    "threads",
    "clocks_perf_boost",
    "cache_l3",
    "tdp",
    "ecc_support",
    "includes_cooler",
    "simul_multithread",
  ]
}

attributes! {
  /// Graphics card attributes.
  pub struct GpuSpecs {
    chipset: Option<String> => "chipset", "Chipset";
    memory: Option<i64> => "memory", "Memory (GB)";
    memory_type: Option<String> => "memoryType", "Memory Type";
    core_base_clock: Option<i64> => "clocks.coreBase", "Base Clock";
    core_boost_clock: Option<i64> => "clocks.coreBoost", "Boost Clock";
    effective_memory_clock: Option<i64> => "clocks.effectiveMemory", "Memory Clock";
    interface: Option<String> => "interface", "Interface";
    length: Option<i64> => "dimensions.length", "Length (mm)";
    slot_width: Option<rust_decimal::Decimal> => "dimensions.slotWidth", "Slot Width";
    tdp: Option<i64> => "tdp", "TDP";
    pcie_6pin: Option<i64> => "powerConnectors.pcie6Pin", "6-pin PCIe";
    pcie_8pin: Option<i64> => "powerConnectors.pcie8Pin", "8-pin PCIe";
    pcie_12vhpwr: Option<i64> => "powerConnectors.pcie12VHPWR", "12VHPWR";
    hdmi_outputs: Option<i64> => "videoOutputs.hdmi", "HDMI Outputs";
    displayport_outputs: Option<i64> => "videoOutputs.displayPort", "DisplayPort Outputs";
    dvi_outputs: Option<i64> => "videoOutputs.dvi", "DVI Outputs";
    frame_sync: Option<String> => "frameSync", "Frame Sync";
  }
  filter: [
    "manufacturer",
    "chipset",
    "memory",
    "memory_type",
    "core_boost_clock",
    "length",
    "slot_width",
    "tdp",
    "frame_sync",
  ]
}

attributes! {
  /// Motherboard attributes.
  pub struct MotherboardSpecs {
    socket: Option<String> => "socket", "Socket";
    form_factor: Option<String> => "formFactor", "Form Factor";
    chipset: Option<String> => "chipset", "Chipset";
    memory_slots: Option<i64> => "memory.slots", "Memory Slots";
    memory_max: Option<i64> => "memory.max", "Max Memory (GB)";
    memory_type: Option<String> => "memory.type", "Memory Type";
    memory_max_speed: Option<i64> => "memory.maxSpeed", "Max Memory Speed";
    pcie_x16_slots: Option<i64> => "expansion.pcieX16", "PCIe x16 Slots";
    pcie_x4_slots: Option<i64> => "expansion.pcieX4", "PCIe x4 Slots";
    pcie_x1_slots: Option<i64> => "expansion.pcieX1", "PCIe x1 Slots";
    m2_slots: Option<i64> => "storage.m2Slots", "M.2 Slots";
    sata_ports: Option<i64> => "storage.sataPorts", "SATA Ports";
    wifi: Option<bool> => "networking.wifi", "Wi-Fi";
    ethernet: Option<String> => "networking.ethernet", "Ethernet";
    ecc_support: Option<bool> => "eccSupport", "ECC Support";
    raid_support: Option<bool> => "raidSupport", "RAID Support";
  }
  filter: [
    "manufacturer",
    "socket",
    "form_factor",
    "chipset",
    "memory_type",
    "memory_slots",
    "memory_max",
    "m2_slots",
    "wifi",
  ]
}

attributes! {
  /// Power supply attributes.
  pub struct PsuSpecs {
    wattage: Option<i64> => "wattage", "Wattage";
    form_factor: Option<String> => "formFactor", "Form Factor";
    efficiency_rating: Option<String> => "efficiencyRating", "Efficiency Rating";
    modular: Option<String> => "modular", "Modular";
    length: Option<i64> => "length", "Length (mm)";
    fanless: Option<bool> => "fanless", "Fanless";
    atx_version: Option<String> => "atxVersion", "ATX Version";
    eps_8pin: Option<i64> => "connectors.eps8Pin", "8-pin EPS";
    pcie_8pin: Option<i64> => "connectors.pcie8Pin", "8-pin PCIe";
    pcie_12vhpwr: Option<i64> => "connectors.pcie12VHPWR", "12VHPWR";
    sata: Option<i64> => "connectors.sata", "SATA";
    molex: Option<i64> => "connectors.molex", "Molex";
  }
  filter: [
    "manufacturer",
    "wattage",
    "form_factor",
    "efficiency_rating",
    "modular",
    "fanless",
  ]
}

attributes! {
  /// Memory kit attributes. Capacities are in GB, speed in MT/s.
  pub struct RamSpecs {
    memory_type: Option<String> => "type", "Memory Type";
    speed: Option<i64> => "speed", "Speed";
    form_factor: Option<String> => "formFactor", "Form Factor";
    modules: Option<i64> => "modules.quantity", "Modules";
    module_capacity: Option<i64> => "modules.capacity", "Module Capacity";
    total_capacity: Option<i64> => "capacity", "Capacity";
    cas_latency: Option<i64> => "timings.cas", "CAS Latency";
    first_word_latency: Option<rust_decimal::Decimal> => "timings.firstWordLatency", "First Word Latency (ns)";
    voltage: Option<rust_decimal::Decimal> => "voltage", "Voltage";
    ecc: Option<bool> => "ecc", "ECC";
    registered: Option<bool> => "registered", "Registered";
    heat_spreader: Option<bool> => "heatSpreader", "Heat Spreader";
    rgb: Option<bool> => "rgb", "RGB";
    color: Option<String> => "color", "Color";
  }
  filter: [
    "manufacturer",
    "memory_type",
    "speed",
    "total_capacity",
    "modules",
    "cas_latency",
    "voltage",
    "ecc",
    "rgb",
  ]
}

attributes! {
  /// Drive attributes. Capacity is in GB, throughput in MB/s.
  pub struct StorageSpecs {
    storage_type: Option<String> => "type", "Type";
    form_factor: Option<String> => "formFactor", "Form Factor";
    interface: Option<String> => "interface", "Interface";
    capacity: Option<i64> => "capacity", "Capacity";
    cache: Option<i64> => "cache", "Cache (MB)";
    nvme: Option<bool> => "nvme", "NVMe";
    rpm: Option<i64> => "rpm", "RPM";
    read_speed: Option<i64> => "performance.sequentialRead", "Sequential Read";
    write_speed: Option<i64> => "performance.sequentialWrite", "Sequential Write";
    endurance_tbw: Option<i64> => "endurance.tbw", "Endurance (TBW)";
  }
  filter: [
    "manufacturer",
    "storage_type",
    "form_factor",
    "interface",
    "capacity",
    "nvme",
    "read_speed",
  ]
}

attributes! {
  /// Case attributes. Lengths are in mm, volume in litres.
  pub struct CaseSpecs {
    form_factor: Option<String> => "formFactor", "Form Factor";
    supported_motherboards: Vec<String> => "supportedMotherboards", "Supported Motherboards";
    side_panel: Option<String> => "sidePanel", "Side Panel";
    color: Option<String> => "color", "Color";
    volume: Option<rust_decimal::Decimal> => "volume", "Volume (L)";
    max_gpu_length: Option<i64> => "maxGpuLength", "Max GPU Length";
    max_cpu_cooler_height: Option<i64> => "maxCpuCoolerHeight", "Max Cooler Height";
    drive_bays_35: Option<i64> => "driveBays.internal35", "3.5\" Bays";
    drive_bays_25: Option<i64> => "driveBays.internal25", "2.5\" Bays";
    expansion_slots: Option<i64> => "expansionSlots", "Expansion Slots";
    power_supply: Option<String> => "powerSupply", "Included PSU";
    front_usb_c: Option<bool> => "frontPanel.usbC", "Front USB-C";
  }
  filter: [
    "manufacturer",
    "form_factor",
    "side_panel",
    "color",
    "volume",
    "max_gpu_length",
    "front_usb_c",
  ]
}
