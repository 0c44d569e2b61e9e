use super::*;


#[test]
fn test_camel_case_basic() {
    assert_eq!(camel_case("serial_number"), "serialNumber");
    assert_eq!(camel_case("max_num_matches"), "maxNumMatches");
    assert_eq!(camel_case("adom"), "adom");
}

#[test]
fn test_camel_case_keeps_inner_capitals() {
    assert_eq!(camel_case("add_device_sN_list"), "addDeviceSNList");
    assert_eq!(camel_case("DLP_archive_type"), "DLPArchiveType");
}

#[test]
fn test_camel_case_skips_empty_words() {
    assert_eq!(camel_case("task__id"), "taskId");
    assert_eq!(camel_case("_leading"), "leading");
}

#[test]
fn test_camel_case_borrows_when_unchanged() {
    assert!(matches!(camel_case("name"), Cow::Borrowed("name")));
}

#[test]
fn test_adom_device_table() {
    assert_eq!(ADOM_DEVICES.normalize("serial_number"), "SN");
    assert_eq!(ADOM_DEVICES.normalize("dev_id"), "ID");
    assert_eq!(ADOM_DEVICES.normalize("vdom_id"), "vdomID");
    assert_eq!(ADOM_DEVICES.normalize("vdom_name"), "vdomName");
    assert_eq!(ADOM_DEVICES.normalize("device_id_vdom"), "deviceIDVdom");
    assert_eq!(ADOM_DEVICES.normalize("device_sn_vdom"), "deviceSNVdom");
    assert_eq!(ADOM_DEVICES.normalize("add_device_sn_vdom"), "addDeviceSNVdom");
}

#[test]
fn test_group_membership_table() {
    assert_eq!(GROUP_MEMBERSHIP.normalize("add_device_sn_list"), "addDeviceSNList");
    assert_eq!(GROUP_MEMBERSHIP.normalize("del_device_id_list"), "delDeviceIDList");
    assert_eq!(GROUP_MEMBERSHIP.normalize("add_group_id_list"), "addGroupIDList");
    assert_eq!(GROUP_MEMBERSHIP.normalize("del_group_name_list"), "delGroupNameList");
}

#[test]
fn test_single_word_tables() {
    assert_eq!(GROUP_DEVICE.normalize("device_sn"), "deviceSN");
    assert_eq!(DEVICE_VDOM.normalize("dev_id"), "devID");
    assert_eq!(RUN_SCRIPT.normalize("run_on_db"), "runOnDB");
    assert_eq!(LOG_SEARCH.normalize("dlp_archive_type"), "DLPArchiveType");
}

#[test]
fn test_values_outside_table_pass_through() {
    assert_eq!(ADOM_DEVICES.fixup("adomName"), "adomName");
    assert!(matches!(CasingTable::EMPTY.fixup("serialNumber"), Cow::Borrowed(_)));
}

#[test]
fn test_fixup_reaches_fixed_point_on_overlap() {
    // one pass would leave a second `DeviceId` formed across the replacement
    let once = GROUP_MEMBERSHIP.fixup("DeviceIdeviceId");
    assert_eq!(once, "DeviceIDeviceID");
    assert_eq!(GROUP_MEMBERSHIP.fixup(&once), once);
}

#[test]
fn test_tables_shrink_lowercase() {
    for table in ALL_TABLES {
        for (pattern, replacement) in table.pairs() {
            let lower = |s: &str| s.chars().filter(char::is_ascii_lowercase).count();
            assert!(
                lower(replacement) < lower(pattern),
                "replacement {replacement} must drop lowercase letters from {pattern}"
            );
        }
    }
}

#[test]
fn test_snake_case() {
    assert_eq!(snake_case("hostName"), "host_name");
    assert_eq!(snake_case("errorCode"), "error_code");
    assert_eq!(snake_case("SN"), "sn");
    assert_eq!(snake_case("DLPArchiveType"), "dlp_archive_type");
    assert_eq!(snake_case("deviceSNVdom"), "device_sn_vdom");
    assert_eq!(snake_case("getAdomsResponse"), "get_adoms_response");
    assert_eq!(snake_case("ns1:getSystemStatusResponse"), "get_system_status_response");
    assert_eq!(snake_case("task_id"), "task_id");
    assert_eq!(snake_case("ipv4Addr"), "ipv4_addr");
}

#[test]
fn test_field_mapper_directions() {
    let mapper: &dyn FieldMapper = &ADOM_DEVICES;
    assert_eq!(mapper.map_request_field("serial_number"), "SN");
    assert_eq!(mapper.map_response_field("maxNumAdminDomains"), "max_num_admin_domains");
}
