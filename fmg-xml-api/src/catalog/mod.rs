//! Operation catalog.
//!
//! Every remote call the client supports is an [`Operation`] variant. Its
//! [`OperationDescriptor`] holds the SOAP operation name, the response container
//! key, how the payload is extracted and the request rules. The descriptor
//! is static data, so adding an operation is a table entry, not new code.
//!
//! ```
//! use fmg_xml_api::catalog::{Operation, ResponseShape};
//!
//! let descriptor = Operation::GetAdomByName.descriptor();
//! assert_eq!(descriptor.wire_name, "getAdoms");
//! assert_eq!(descriptor.container, "get_adoms_response");
//! assert_eq!(descriptor.response, ResponseShape::Standard(&["adom_detail"]));
//!
//! let op: Operation = "search_faz_log".parse().unwrap();
//! assert_eq!(op, Operation::SearchFazLog);
//! ```

use std::{fmt, str::FromStr};

pub mod spec;
mod table;

pub use spec::{
    Choice, CoRequired, EntryRule, EntrySpec, EntryTag, OperationDescriptor, Pick, RequestSpec,
    ResponseShape, SoftRule,
};

use crate::error::FmgError;

/// Supported remote operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operation {
    /// Create an ADOM, optionally with member devices.
    AddAdom,
    /// Register a device.
    AddDevice,
    /// Create a device group.
    AddGroup,
    /// Create a policy package, optionally with install targets.
    AddPolicyPackage,
    /// Edit a policy package (same request as [`AddPolicyPackage`](Self::AddPolicyPackage)).
    EditPolicyPackage,
    /// Assign a global policy package to ADOMs.
    AssignGlobalPolicy,
    /// Create a script.
    CreateScript,
    /// Delete an ADOM.
    DeleteAdom,
    /// Delete a configuration revision.
    DeleteConfigRev,
    /// Delete a device.
    DeleteDevice,
    /// Delete a device group.
    DeleteGroup,
    /// Delete a script.
    DeleteScript,
    /// Edit an ADOM's settings, member devices or meta fields.
    EditAdom,
    /// Add or remove devices and groups from a group.
    EditGroupMembership,
    /// Look up an ADOM by name.
    GetAdomByName,
    /// Look up an ADOM by object id.
    GetAdomByOid,
    /// List ADOMs.
    GetAdomList,
    /// Fetch a device configuration revision.
    GetConfig,
    /// List a device's configuration revisions.
    GetConfigRevisionHistory,
    /// Look up a device.
    GetDevice,
    /// List device licenses.
    GetDeviceLicenseList,
    /// List devices in an ADOM.
    GetDeviceList,
    /// List a device's VDOMs.
    GetDeviceVdomList,
    /// Fetch an archived analyzer file.
    GetFazArchive,
    /// Fetch the analyzer configuration.
    GetFazConfig,
    /// Fetch the manager configuration (same request as [`GetFazConfig`](Self::GetFazConfig)).
    GetFmgConfig,
    /// Fetch a generated analyzer report.
    GetFazGeneratedReport,
    /// List device groups in an ADOM.
    GetGroupList,
    /// Look up device groups.
    GetGroup,
    /// Fetch installation logs.
    GetInstlog,
    /// List policy packages in an ADOM.
    GetPackageList,
    /// Fetch a script.
    GetScript,
    /// Fetch a script execution log.
    GetScriptLog,
    /// Summarize script execution logs for a device.
    GetScriptLogSummary,
    /// Fetch appliance status fields.
    GetSystemStatus,
    /// Fetch a task.
    GetTaskDetail,
    /// Import device policy into an ADOM.
    ImportPolicy,
    /// Install a policy package to a device.
    InstallConfig,
    /// List generated analyzer reports.
    ListFazGeneratedReports,
    /// List configuration revision ids.
    ListRevisionId,
    /// Delete an archived analyzer file.
    RemoveFazArchive,
    /// Retrieve a device's running configuration.
    RetrieveConfig,
    /// Revert a device to a configuration revision.
    RevertConfig,
    /// Run an analyzer report.
    RunFazReport,
    /// Run a script on a device.
    RunScript,
    /// Search analyzer logs.
    SearchFazLog,
    /// Replace the analyzer configuration.
    SetFazConfig,
    /// Replace the manager configuration (same request as [`SetFazConfig`](Self::SetFazConfig)).
    SetFmgConfig,
}

impl Operation {
    /// Every operation, in catalog order.
    pub const ALL: [Self; 48] = [
        Self::AddAdom,
        Self::AddDevice,
        Self::AddGroup,
        Self::AddPolicyPackage,
        Self::EditPolicyPackage,
        Self::AssignGlobalPolicy,
        Self::CreateScript,
        Self::DeleteAdom,
        Self::DeleteConfigRev,
        Self::DeleteDevice,
        Self::DeleteGroup,
        Self::DeleteScript,
        Self::EditAdom,
        Self::EditGroupMembership,
        Self::GetAdomByName,
        Self::GetAdomByOid,
        Self::GetAdomList,
        Self::GetConfig,
        Self::GetConfigRevisionHistory,
        Self::GetDevice,
        Self::GetDeviceLicenseList,
        Self::GetDeviceList,
        Self::GetDeviceVdomList,
        Self::GetFazArchive,
        Self::GetFazConfig,
        Self::GetFmgConfig,
        Self::GetFazGeneratedReport,
        Self::GetGroupList,
        Self::GetGroup,
        Self::GetInstlog,
        Self::GetPackageList,
        Self::GetScript,
        Self::GetScriptLog,
        Self::GetScriptLogSummary,
        Self::GetSystemStatus,
        Self::GetTaskDetail,
        Self::ImportPolicy,
        Self::InstallConfig,
        Self::ListFazGeneratedReports,
        Self::ListRevisionId,
        Self::RemoveFazArchive,
        Self::RetrieveConfig,
        Self::RevertConfig,
        Self::RunFazReport,
        Self::RunScript,
        Self::SearchFazLog,
        Self::SetFazConfig,
        Self::SetFmgConfig,
    ];

    /// Returns the catalog entry for this operation.
    #[must_use]
    pub const fn descriptor(self) -> &'static OperationDescriptor {
        match self {
            Self::AddAdom => &table::ADD_ADOM,
            Self::AddDevice => &table::ADD_DEVICE,
            Self::AddGroup => &table::ADD_GROUP,
            Self::AddPolicyPackage | Self::EditPolicyPackage => &table::ADD_POLICY_PACKAGE,
            Self::AssignGlobalPolicy => &table::ASSIGN_GLOBAL_POLICY,
            Self::CreateScript => &table::CREATE_SCRIPT,
            Self::DeleteAdom => &table::DELETE_ADOM,
            Self::DeleteConfigRev => &table::DELETE_CONFIG_REV,
            Self::DeleteDevice => &table::DELETE_DEVICE,
            Self::DeleteGroup => &table::DELETE_GROUP,
            Self::DeleteScript => &table::DELETE_SCRIPT,
            Self::EditAdom => &table::EDIT_ADOM,
            Self::EditGroupMembership => &table::EDIT_GROUP_MEMBERSHIP,
            Self::GetAdomByName => &table::GET_ADOM_BY_NAME,
            Self::GetAdomByOid => &table::GET_ADOM_BY_OID,
            Self::GetAdomList => &table::GET_ADOM_LIST,
            Self::GetConfig => &table::GET_CONFIG,
            Self::GetConfigRevisionHistory => &table::GET_CONFIG_REVISION_HISTORY,
            Self::GetDevice => &table::GET_DEVICE,
            Self::GetDeviceLicenseList => &table::GET_DEVICE_LICENSE_LIST,
            Self::GetDeviceList => &table::GET_DEVICE_LIST,
            Self::GetDeviceVdomList => &table::GET_DEVICE_VDOM_LIST,
            Self::GetFazArchive => &table::GET_FAZ_ARCHIVE,
            Self::GetFazConfig | Self::GetFmgConfig => &table::GET_FAZ_CONFIG,
            Self::GetFazGeneratedReport => &table::GET_FAZ_GENERATED_REPORT,
            Self::GetGroupList => &table::GET_GROUP_LIST,
            Self::GetGroup => &table::GET_GROUP,
            Self::GetInstlog => &table::GET_INSTLOG,
            Self::GetPackageList => &table::GET_PACKAGE_LIST,
            Self::GetScript => &table::GET_SCRIPT,
            Self::GetScriptLog => &table::GET_SCRIPT_LOG,
            Self::GetScriptLogSummary => &table::GET_SCRIPT_LOG_SUMMARY,
            Self::GetSystemStatus => &table::GET_SYSTEM_STATUS,
            Self::GetTaskDetail => &table::GET_TASK_DETAIL,
            Self::ImportPolicy => &table::IMPORT_POLICY,
            Self::InstallConfig => &table::INSTALL_CONFIG,
            Self::ListFazGeneratedReports => &table::LIST_FAZ_GENERATED_REPORTS,
            Self::ListRevisionId => &table::LIST_REVISION_ID,
            Self::RemoveFazArchive => &table::REMOVE_FAZ_ARCHIVE,
            Self::RetrieveConfig => &table::RETRIEVE_CONFIG,
            Self::RevertConfig => &table::REVERT_CONFIG,
            Self::RunFazReport => &table::RUN_FAZ_REPORT,
            Self::RunScript => &table::RUN_SCRIPT_OP,
            Self::SearchFazLog => &table::SEARCH_FAZ_LOG,
            Self::SetFazConfig | Self::SetFmgConfig => &table::SET_FAZ_CONFIG,
        }
    }

    /// Snake-case name of the operation, as accepted by [`FromStr`].
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::AddAdom => "add_adom",
            Self::AddDevice => "add_device",
            Self::AddGroup => "add_group",
            Self::AddPolicyPackage => "add_policy_package",
            Self::EditPolicyPackage => "edit_policy_package",
            Self::AssignGlobalPolicy => "assign_global_policy",
            Self::CreateScript => "create_script",
            Self::DeleteAdom => "delete_adom",
            Self::DeleteConfigRev => "delete_config_rev",
            Self::DeleteDevice => "delete_device",
            Self::DeleteGroup => "delete_group",
            Self::DeleteScript => "delete_script",
            Self::EditAdom => "edit_adom",
            Self::EditGroupMembership => "edit_group_membership",
            Self::GetAdomByName => "get_adom_by_name",
            Self::GetAdomByOid => "get_adom_by_oid",
            Self::GetAdomList => "get_adom_list",
            Self::GetConfig => "get_config",
            Self::GetConfigRevisionHistory => "get_config_revision_history",
            Self::GetDevice => "get_device",
            Self::GetDeviceLicenseList => "get_device_license_list",
            Self::GetDeviceList => "get_device_list",
            Self::GetDeviceVdomList => "get_device_vdom_list",
            Self::GetFazArchive => "get_faz_archive",
            Self::GetFazConfig => "get_faz_config",
            Self::GetFmgConfig => "get_fmg_config",
            Self::GetFazGeneratedReport => "get_faz_generated_report",
            Self::GetGroupList => "get_group_list",
            Self::GetGroup => "get_group",
            Self::GetInstlog => "get_instlog",
            Self::GetPackageList => "get_package_list",
            Self::GetScript => "get_script",
            Self::GetScriptLog => "get_script_log",
            Self::GetScriptLogSummary => "get_script_log_summary",
            Self::GetSystemStatus => "get_system_status",
            Self::GetTaskDetail => "get_task_detail",
            Self::ImportPolicy => "import_policy",
            Self::InstallConfig => "install_config",
            Self::ListFazGeneratedReports => "list_faz_generated_reports",
            Self::ListRevisionId => "list_revision_id",
            Self::RemoveFazArchive => "remove_faz_archive",
            Self::RetrieveConfig => "retrieve_config",
            Self::RevertConfig => "revert_config",
            Self::RunFazReport => "run_faz_report",
            Self::RunScript => "run_script",
            Self::SearchFazLog => "search_faz_log",
            Self::SetFazConfig => "set_faz_config",
            Self::SetFmgConfig => "set_fmg_config",
        }
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Operation {
    type Err = FmgError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|op| op.as_str() == s)
            .ok_or_else(|| FmgError::Validation(format!("unknown operation '{s}'")))
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use super::*;
    use crate::casing::{camel_case, snake_case};

    #[test]
    fn test_operation_names_are_unique() {
        let names: HashSet<_> = Operation::ALL.iter().map(|op| op.as_str()).collect();
        assert_eq!(names.len(), Operation::ALL.len());
    }

    #[test]
    fn test_operation_round_trips_through_name() {
        for op in Operation::ALL {
            assert_eq!(op.as_str().parse::<Operation>().unwrap(), op);
            assert_eq!(op.to_string(), op.as_str());
        }
    }

    #[test]
    fn test_unknown_operation_name() {
        let err = "add_everything".parse::<Operation>().unwrap_err();
        assert!(err.to_string().contains("add_everything"));
    }

    #[test]
    fn test_container_follows_wire_name() {
        for op in Operation::ALL {
            let d = op.descriptor();
            assert_eq!(d.container, format!("{}_response", snake_case(d.wire_name)), "{op}");
            assert_eq!(camel_case(&snake_case(d.wire_name)), d.wire_name, "{op}");
        }
    }

    #[test]
    fn test_required_keys_have_no_defaults() {
        for op in Operation::ALL {
            let spec = op.descriptor().request;
            for (key, _) in spec.defaults {
                assert!(!spec.required.contains(key), "{op}: '{key}' both required and defaulted");
            }
        }
    }

    #[test]
    fn test_aliases_share_descriptors() {
        assert_eq!(
            Operation::EditPolicyPackage.descriptor(),
            Operation::AddPolicyPackage.descriptor()
        );
        assert_eq!(Operation::GetFmgConfig.descriptor(), Operation::GetFazConfig.descriptor());
        assert_eq!(Operation::SetFmgConfig.descriptor(), Operation::SetFazConfig.descriptor());
    }

    #[test]
    fn test_special_response_shapes() {
        assert_eq!(Operation::DeleteScript.descriptor().response, ResponseShape::Constant("0"));
        assert_eq!(Operation::GetSystemStatus.descriptor().response, ResponseShape::Status);
        assert_eq!(
            Operation::SearchFazLog.descriptor().response,
            ResponseShape::Standard(&["logs", "data"])
        );
    }

    #[test]
    fn test_device_pair_is_exclusive() {
        let spec = Operation::GetScriptLogSummary.descriptor().request;
        let device = spec.choices.iter().find(|c| c.keys.contains(&"serial_number")).unwrap();
        assert_eq!(device.pick, Pick::Exclusive);

        let instlog = Operation::GetInstlog.descriptor().request;
        assert_eq!(instlog.choices[0].pick, Pick::All);
    }

    #[test]
    fn test_accepts_known_keys_only() {
        let spec = Operation::AddAdom.descriptor().request;
        assert!(spec.accepts("name"));
        assert!(spec.accepts("version"));
        assert!(spec.accepts("devices"));
        assert!(!spec.accepts("vdom_name"));

        let history = Operation::GetConfigRevisionHistory.descriptor().request;
        assert!(history.accepts("max_checkin_date"));
        assert!(history.accepts("min_revision_number"));
    }

    #[test]
    fn test_rename() {
        let spec = Operation::InstallConfig.descriptor().request;
        assert_eq!(spec.rename("rev_name"), "new_rev_name");
        assert_eq!(spec.rename("adom"), "adom");
    }
}
