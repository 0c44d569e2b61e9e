//! Per-operation catalog entries.

use super::spec::{
    Choice, CoRequired, EntryRule, EntrySpec, EntryTag, OperationDescriptor, Pick, RequestSpec,
    ResponseShape, SoftRule,
};
use crate::casing::{
    ADOM_DEVICES, DEVICE_VDOM, GROUP_DEVICE, GROUP_MEMBERSHIP, LOG_SEARCH, RUN_SCRIPT,
};

const ROOT_ADOM: (&str, &str) = ("adom", "root");

/// Managed device identified by serial number or by device id, never both.
const DEVICE: Choice = Choice { keys: &["serial_number", "dev_id"], pick: Pick::Exclusive };

const fn standard(
    wire_name: &'static str,
    container: &'static str,
    payload: &'static [&'static str],
    request: &'static RequestSpec,
) -> OperationDescriptor {
    OperationDescriptor { wire_name, container, response: ResponseShape::Standard(payload), request }
}

const ADOM_DEVICE_FIELDS: &[&str] = &["serial_number", "dev_id", "vdom_name", "vdom_id"];
const ADOM_DEVICE_RULE: EntryRule =
    EntryRule::AnyOfEach(&[&["serial_number", "dev_id"], &["vdom_name", "vdom_id"]]);

pub(super) const ADD_ADOM: OperationDescriptor = standard(
    "addAdom",
    "add_adom_response",
    &["error_msg"],
    &RequestSpec {
        required: &["name"],
        defaults: &[("is_backup_mode", "0")],
        co_required: &[CoRequired { keys: ["version", "mr"], default: Some(["500", "0"]) }],
        entries: &[EntrySpec {
            key: "devices",
            wrapper: None,
            tag: EntryTag::ByKey(&[("serial_number", "deviceSNVdom"), ("dev_id", "deviceIDVdom")]),
            fields: ADOM_DEVICE_FIELDS,
            rule: ADOM_DEVICE_RULE,
            required: false,
        }],
        casing: ADOM_DEVICES,
        ..RequestSpec::EMPTY
    },
);

pub(super) const ADD_DEVICE: OperationDescriptor = standard(
    "addDevice",
    "add_device_response",
    &["task_id"],
    &RequestSpec {
        required: &["ip", "name"],
        defaults: &[ROOT_ADOM, ("admin_user", "admin"), ("password", "")],
        optional: &["description"],
        ..RequestSpec::EMPTY
    },
);

pub(super) const ADD_GROUP: OperationDescriptor = standard(
    "addGroup",
    "add_group_response",
    &["error_msg"],
    &RequestSpec {
        required: &["name"],
        defaults: &[ROOT_ADOM],
        optional: &["description", "group_name"],
        choices: &[Choice { keys: &["device_sn", "device_id"], pick: Pick::OptionalFirst }],
        casing: GROUP_DEVICE,
        ..RequestSpec::EMPTY
    },
);

pub(super) const ADD_POLICY_PACKAGE: OperationDescriptor = standard(
    "addPolicyPackage",
    "add_policy_package_response",
    &["policy_package_oid"],
    &RequestSpec {
        required: &["policy_package_name"],
        defaults: &[ROOT_ADOM, ("is_global", "0")],
        optional: &["clone_from", "rename"],
        flags: &["fg_is_not_vdom_mode"],
        entries: &[EntrySpec {
            key: "targets",
            wrapper: Some("packageInstallTarget"),
            tag: EntryTag::KeyName,
            fields: &["dev", "grp"],
            rule: EntryRule::InstallTarget,
            required: false,
        }],
        ..RequestSpec::EMPTY
    },
);

pub(super) const ASSIGN_GLOBAL_POLICY: OperationDescriptor = standard(
    "assignGlobalPolicy",
    "assign_global_policy_response",
    &["task_id"],
    &RequestSpec {
        defaults: &[
            ("adom", "Global"),
            ("policy_package_name", "default"),
            ("all_objects", "0"),
            ("install_to_device", "0"),
            ("check_assignd_dup", "0"),
        ],
        entries: &[EntrySpec {
            key: "targets",
            wrapper: None,
            tag: EntryTag::Fixed("adomList"),
            fields: &["name", "pkg"],
            rule: EntryRule::AnyOfEach(&[&["name"], &["pkg.oid", "pkg.name"]]),
            required: true,
        }],
        ..RequestSpec::EMPTY
    },
);

pub(super) const CREATE_SCRIPT: OperationDescriptor = standard(
    "createScript",
    "create_script_response",
    &["return"],
    &RequestSpec {
        required: &["adom", "name", "content"],
        defaults: &[
            ("is_global", "0"),
            ("type", "CLI"),
            ("description", "created via XML API"),
            ("overwrite", "0"),
        ],
        ..RequestSpec::EMPTY
    },
);

pub(super) const DELETE_ADOM: OperationDescriptor = standard(
    "deleteAdom",
    "delete_adom_response",
    &["error_msg"],
    &RequestSpec {
        choices: &[Choice { keys: &["adom_name", "adom_oid"], pick: Pick::First }],
        ..RequestSpec::EMPTY
    },
);

pub(super) const DELETE_CONFIG_REV: OperationDescriptor = standard(
    "deleteConfigRev",
    "delete_config_rev_response",
    &["error_msg"],
    &RequestSpec {
        choices: &[DEVICE, Choice { keys: &["rev_name", "rev_id"], pick: Pick::First }],
        ..RequestSpec::EMPTY
    },
);

pub(super) const DELETE_DEVICE: OperationDescriptor = standard(
    "deleteDevice",
    "delete_device_response",
    &["task_id"],
    &RequestSpec { choices: &[DEVICE], ..RequestSpec::EMPTY },
);

pub(super) const DELETE_GROUP: OperationDescriptor = standard(
    "deleteGroup",
    "delete_group_response",
    &["error_msg"],
    &RequestSpec {
        required: &["adom"],
        choices: &[Choice { keys: &["grp_name", "grp_id"], pick: Pick::First }],
        renames: &[("grp_name", "name")],
        ..RequestSpec::EMPTY
    },
);

pub(super) const DELETE_SCRIPT: OperationDescriptor = OperationDescriptor {
    wire_name: "deleteScript",
    container: "delete_script_response",
    response: ResponseShape::Constant("0"),
    request: &RequestSpec { required: &["name"], defaults: &[("type", "CLI")], ..RequestSpec::EMPTY },
};

pub(super) const EDIT_ADOM: OperationDescriptor = standard(
    "editAdom",
    "edit_adom_response",
    &["error_msg"],
    &RequestSpec {
        required: &["name"],
        optional: &["is_backup_mode", "state", "vpn_management"],
        co_required: &[CoRequired { keys: ["version", "mr"], default: None }],
        entries: &[
            EntrySpec {
                key: "devices",
                wrapper: None,
                tag: EntryTag::ByKey(&[
                    ("serial_number", "addDeviceSNVdom"),
                    ("dev_id", "addDeviceIDVdom"),
                ]),
                fields: ADOM_DEVICE_FIELDS,
                rule: ADOM_DEVICE_RULE,
                required: false,
            },
            EntrySpec {
                key: "meta",
                wrapper: Some("metafields"),
                tag: EntryTag::Fixed("metafield"),
                fields: &["name", "value"],
                rule: EntryRule::AnyOfEach(&[&["name"], &["value"]]),
                required: false,
            },
        ],
        casing: ADOM_DEVICES,
        ..RequestSpec::EMPTY
    },
);

pub(super) const EDIT_GROUP_MEMBERSHIP: OperationDescriptor = standard(
    "editGroupMembership",
    "edit_group_membership_response",
    &["error_msg"],
    &RequestSpec {
        defaults: &[ROOT_ADOM],
        choices: &[
            Choice { keys: &["grp_name", "grp_id"], pick: Pick::First },
            Choice {
                keys: &[
                    "add_device_sn_list",
                    "add_device_id_list",
                    "del_device_sn_list",
                    "del_device_id_list",
                    "add_group_name_list",
                    "add_group_id_list",
                    "del_group_name_list",
                    "del_group_id_list",
                ],
                pick: Pick::All,
            },
        ],
        renames: &[("grp_name", "name")],
        casing: GROUP_MEMBERSHIP,
        ..RequestSpec::EMPTY
    },
);

pub(super) const GET_ADOM_BY_NAME: OperationDescriptor = standard(
    "getAdoms",
    "get_adoms_response",
    &["adom_detail"],
    &RequestSpec {
        defaults: &[ROOT_ADOM],
        renames: &[("adom", "names")],
        ..RequestSpec::EMPTY
    },
);

pub(super) const GET_ADOM_BY_OID: OperationDescriptor = standard(
    "getAdoms",
    "get_adoms_response",
    &["adom_detail"],
    &RequestSpec {
        defaults: &[("adom_id", "3")],
        renames: &[("adom_id", "adom_ids")],
        ..RequestSpec::EMPTY
    },
);

pub(super) const GET_ADOM_LIST: OperationDescriptor =
    standard("getAdomList", "get_adom_list_response", &["adom_info"], &RequestSpec::EMPTY);

pub(super) const GET_CONFIG: OperationDescriptor = standard(
    "getConfig",
    "get_config_response",
    &["return"],
    &RequestSpec {
        required: &["revision_number"],
        optional: &["adom"],
        choices: &[DEVICE],
        ..RequestSpec::EMPTY
    },
);

pub(super) const GET_CONFIG_REVISION_HISTORY: OperationDescriptor = standard(
    "getConfigRevisionHistory",
    "get_config_revision_history_response",
    &["return"],
    &RequestSpec {
        optional: &["checkin_user"],
        choices: &[DEVICE],
        soft: &[
            SoftRule::DateRange {
                min: "min_checkin_date",
                max: "max_checkin_date",
                strict: false,
                require_both: false,
            },
            SoftRule::NumberRange { min: "min_revision_number", max: "max_revision_number" },
        ],
        ..RequestSpec::EMPTY
    },
);

pub(super) const GET_DEVICE: OperationDescriptor = standard(
    "getDevices",
    "get_devices_response",
    &["device_detail"],
    &RequestSpec {
        choices: &[DEVICE],
        renames: &[("serial_number", "serial_numbers"), ("dev_id", "dev_ids")],
        ..RequestSpec::EMPTY
    },
);

pub(super) const GET_DEVICE_LICENSE_LIST: OperationDescriptor = standard(
    "getDeviceLicenseList",
    "get_device_license_list_response",
    &["return"],
    &RequestSpec::EMPTY,
);

pub(super) const GET_DEVICE_LIST: OperationDescriptor = standard(
    "getDeviceList",
    "get_device_list_response",
    &["device_detail"],
    &RequestSpec { defaults: &[ROOT_ADOM], fixed: &[("detail", "1")], ..RequestSpec::EMPTY },
);

pub(super) const GET_DEVICE_VDOM_LIST: OperationDescriptor = standard(
    "getDeviceVdomList",
    "get_device_vdom_list_response",
    &["return"],
    &RequestSpec {
        choices: &[Choice { keys: &["dev_name", "dev_id"], pick: Pick::First }],
        casing: DEVICE_VDOM,
        ..RequestSpec::EMPTY
    },
);

const FAZ_ARCHIVE: RequestSpec =
    RequestSpec { required: &["adom", "dev_id", "file_name", "type"], ..RequestSpec::EMPTY };

pub(super) const GET_FAZ_ARCHIVE: OperationDescriptor =
    standard("getFazArchive", "get_faz_archive_response", &["file_list"], &FAZ_ARCHIVE);

pub(super) const GET_FAZ_CONFIG: OperationDescriptor =
    standard("getFazConfig", "get_faz_config_response", &["config"], &RequestSpec::EMPTY);

pub(super) const GET_FAZ_GENERATED_REPORT: OperationDescriptor = standard(
    "getFazGeneratedReport",
    "get_faz_generated_report_response",
    &["return"],
    &RequestSpec {
        required: &["report_date", "report_name"],
        defaults: &[ROOT_ADOM],
        optional: &["compression"],
        ..RequestSpec::EMPTY
    },
);

pub(super) const GET_GROUP_LIST: OperationDescriptor = standard(
    "getGroupList",
    "get_group_list_response",
    &["group_detail"],
    &RequestSpec { defaults: &[ROOT_ADOM], fixed: &[("detail", "1")], ..RequestSpec::EMPTY },
);

pub(super) const GET_GROUP: OperationDescriptor = standard(
    "getGroups",
    "get_groups_response",
    &["group_detail"],
    &RequestSpec {
        defaults: &[ROOT_ADOM],
        choices: &[Choice { keys: &["name", "grp_id"], pick: Pick::All }],
        renames: &[("name", "names"), ("grp_id", "grp_ids")],
        ..RequestSpec::EMPTY
    },
);

pub(super) const GET_INSTLOG: OperationDescriptor = standard(
    "getInstlog",
    "get_instlog_response",
    &["inst_log"],
    &RequestSpec {
        optional: &["task_id"],
        choices: &[Choice { keys: &["dev_id", "serial_number"], pick: Pick::All }],
        ..RequestSpec::EMPTY
    },
);

pub(super) const GET_PACKAGE_LIST: OperationDescriptor = standard(
    "getPackageList",
    "get_package_list_response",
    &["return"],
    &RequestSpec { defaults: &[ROOT_ADOM], ..RequestSpec::EMPTY },
);

pub(super) const GET_SCRIPT: OperationDescriptor = standard(
    "getScript",
    "get_script_response",
    &["return"],
    &RequestSpec {
        required: &["script_name"],
        renames: &[("script_name", "name")],
        ..RequestSpec::EMPTY
    },
);

pub(super) const GET_SCRIPT_LOG: OperationDescriptor = standard(
    "getScriptLog",
    "get_script_log_response",
    &["return"],
    &RequestSpec { required: &["script_name"], choices: &[DEVICE], ..RequestSpec::EMPTY },
);

pub(super) const GET_SCRIPT_LOG_SUMMARY: OperationDescriptor = standard(
    "getScriptLogSummary",
    "get_script_log_summary_response",
    &["return"],
    &RequestSpec {
        defaults: &[("max_logs", "1000")],
        choices: &[DEVICE],
        ..RequestSpec::EMPTY
    },
);

pub(super) const GET_SYSTEM_STATUS: OperationDescriptor = OperationDescriptor {
    wire_name: "getSystemStatus",
    container: "get_system_status_response",
    response: ResponseShape::Status,
    request: &RequestSpec::EMPTY,
};

pub(super) const GET_TASK_DETAIL: OperationDescriptor = standard(
    "getTaskList",
    "get_task_list_response",
    &["task_list"],
    &RequestSpec { required: &["task_id"], defaults: &[ROOT_ADOM], ..RequestSpec::EMPTY },
);

pub(super) const IMPORT_POLICY: OperationDescriptor = standard(
    "importPolicy",
    "import_policy_response",
    &["report"],
    &RequestSpec {
        choices: &[
            Choice { keys: &["adom_name", "adom_id"], pick: Pick::First },
            Choice { keys: &["dev_name", "dev_id"], pick: Pick::First },
            Choice { keys: &["vdom_name", "vdom_id"], pick: Pick::First },
        ],
        renames: &[("adom_id", "adom_oid")],
        ..RequestSpec::EMPTY
    },
);

pub(super) const INSTALL_CONFIG: OperationDescriptor = standard(
    "installConfig",
    "install_config_response",
    &["task_id"],
    &RequestSpec {
        required: &["adom", "pkgoid"],
        optional: &["rev_name", "validate"],
        choices: &[DEVICE],
        renames: &[("rev_name", "new_rev_name"), ("validate", "install_validate")],
        ..RequestSpec::EMPTY
    },
);

pub(super) const LIST_FAZ_GENERATED_REPORTS: OperationDescriptor = standard(
    "listFazGeneratedReports",
    "list_faz_generated_reports_response",
    &["report_list"],
    &RequestSpec {
        defaults: &[ROOT_ADOM],
        soft: &[SoftRule::DateRange {
            min: "start_date",
            max: "end_date",
            strict: true,
            require_both: true,
        }],
        ..RequestSpec::EMPTY
    },
);

pub(super) const LIST_REVISION_ID: OperationDescriptor = standard(
    "listRevisionId",
    "list_revision_id_response",
    &["rev_id"],
    &RequestSpec { optional: &["rev_name"], choices: &[DEVICE], ..RequestSpec::EMPTY },
);

pub(super) const REMOVE_FAZ_ARCHIVE: OperationDescriptor =
    standard("removeFazArchive", "remove_faz_archive_response", &["error_msg"], &FAZ_ARCHIVE);

pub(super) const RETRIEVE_CONFIG: OperationDescriptor = standard(
    "retrieveConfig",
    "retrieve_config_response",
    &["task_id"],
    &RequestSpec {
        optional: &["rev_name"],
        choices: &[DEVICE],
        renames: &[("rev_name", "new_rev_name")],
        ..RequestSpec::EMPTY
    },
);

pub(super) const REVERT_CONFIG: OperationDescriptor = standard(
    "revertConfig",
    "revert_config_response",
    &["error_msg"],
    &RequestSpec { required: &["rev_id"], choices: &[DEVICE], ..RequestSpec::EMPTY },
);

pub(super) const RUN_FAZ_REPORT: OperationDescriptor = standard(
    "runFazReport",
    "run_faz_report_response",
    &["error_msg"],
    &RequestSpec {
        required: &["report_template"],
        defaults: &[ROOT_ADOM],
        optional: &["filter"],
        ..RequestSpec::EMPTY
    },
);

pub(super) const RUN_SCRIPT_OP: OperationDescriptor = standard(
    "runScript",
    "run_script_response",
    &["task_id"],
    &RequestSpec {
        required: &["name", "serial_number"],
        defaults: &[("is_global", "false"), ("run_on_db", "false"), ("type", "CLI")],
        casing: RUN_SCRIPT,
        ..RequestSpec::EMPTY
    },
);

pub(super) const SEARCH_FAZ_LOG: OperationDescriptor = standard(
    "searchFazLog",
    "search_faz_log_response",
    &["logs", "data"],
    &RequestSpec {
        required: &["device_name", "search_criteria"],
        defaults: &[
            ROOT_ADOM,
            ("check_archive", "0"),
            ("compression", "tar"),
            ("content", "logs"),
            ("format", "rawFormat"),
            ("log_type", "traffic"),
        ],
        optional: &["dlp_archive_type"],
        soft: &[
            SoftRule::Floor { key: "max_num_matches", floor: 1, fallback: "10" },
            SoftRule::Floor { key: "start_index", floor: 1, fallback: "1" },
        ],
        casing: LOG_SEARCH,
        ..RequestSpec::EMPTY
    },
);

pub(super) const SET_FAZ_CONFIG: OperationDescriptor = standard(
    "setFazConfig",
    "set_faz_config_response",
    &["task_id"],
    &RequestSpec { required: &["config"], defaults: &[ROOT_ADOM], ..RequestSpec::EMPTY },
);
