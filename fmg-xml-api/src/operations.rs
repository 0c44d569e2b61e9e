//! One method per catalog operation.
//!
//! Each method is a thin wrapper over [`FmgClient::execute`]. Operations with
//! sub-entry slots take them as separate arguments: a single
//! [`Entries::One`] is sent in map form, [`Entries::Many`] as repeated
//! elements.

use std::borrow::Cow;

use crate::{
    catalog::Operation,
    client::FmgClient,
    error::{FmgError, Result},
    options::{Entries, OptionBag},
    report::ErrorReporter,
    response::{Payload, SystemStatus},
    transport::Transport,
};

/// Returns `options` with the given entry slots set. Explicit slots replace
/// any value already stored under the same key.
fn with_entries<'a, const N: usize>(
    options: &'a OptionBag,
    slots: [(&str, Option<Entries>); N],
) -> Cow<'a, OptionBag> {
    if slots.iter().all(|(_, entries)| entries.is_none()) {
        return Cow::Borrowed(options);
    }
    let mut merged = options.clone();
    for (key, entries) in slots {
        if let Some(entries) = entries {
            merged.insert(key, entries);
        }
    }
    Cow::Owned(merged)
}

macro_rules! simple_operations {
    ($($(#[$doc:meta])* $method:ident => $operation:ident;)*) => {
        $(
            $(#[$doc])*
            ///
            /// # Errors
            ///
            /// See [`FmgClient::execute`].
            pub async fn $method(&self, options: &OptionBag) -> Result<Payload> {
                self.execute(Operation::$operation, options).await
            }
        )*
    };
}

macro_rules! parameterless_operations {
    ($($(#[$doc:meta])* $method:ident => $operation:ident;)*) => {
        $(
            $(#[$doc])*
            ///
            /// # Errors
            ///
            /// See [`FmgClient::execute`].
            pub async fn $method(&self) -> Result<Payload> {
                self.execute(Operation::$operation, &OptionBag::new()).await
            }
        )*
    };
}

impl<T: Transport, R: ErrorReporter> FmgClient<T, R> {
    /// Creates an ADOM, optionally with member devices.
    ///
    /// Each device entry names `serial_number` or `dev_id` and `vdom_name` or
    /// `vdom_id`.
    ///
    /// # Errors
    ///
    /// See [`FmgClient::execute`].
    pub async fn add_adom(&self, options: &OptionBag, devices: Option<Entries>) -> Result<Payload> {
        let options = with_entries(options, [("devices", devices)]);
        self.execute(Operation::AddAdom, &options).await
    }

    /// Edits an ADOM, optionally adding member devices and meta fields.
    ///
    /// # Errors
    ///
    /// See [`FmgClient::execute`].
    pub async fn edit_adom(
        &self,
        options: &OptionBag,
        devices: Option<Entries>,
        meta: Option<Entries>,
    ) -> Result<Payload> {
        let options = with_entries(options, [("devices", devices), ("meta", meta)]);
        self.execute(Operation::EditAdom, &options).await
    }

    /// Creates a policy package with optional install targets.
    ///
    /// Each target is `{dev = {...}}` or `{grp = {...}}`. A device target
    /// without a `vdom` needs `fg_is_not_vdom_mode = "1"` in `options`.
    ///
    /// # Errors
    ///
    /// See [`FmgClient::execute`].
    pub async fn add_policy_package(
        &self,
        options: &OptionBag,
        targets: Option<Entries>,
    ) -> Result<Payload> {
        let options = with_entries(options, [("targets", targets)]);
        self.execute(Operation::AddPolicyPackage, &options).await
    }

    /// Edits a policy package. Same request as
    /// [`add_policy_package`](Self::add_policy_package).
    ///
    /// # Errors
    ///
    /// See [`FmgClient::execute`].
    pub async fn edit_policy_package(
        &self,
        options: &OptionBag,
        targets: Option<Entries>,
    ) -> Result<Payload> {
        let options = with_entries(options, [("targets", targets)]);
        self.execute(Operation::EditPolicyPackage, &options).await
    }

    /// Assigns a global policy package to one or more ADOMs.
    ///
    /// # Errors
    ///
    /// See [`FmgClient::execute`].
    pub async fn assign_global_policy(
        &self,
        options: &OptionBag,
        targets: Entries,
    ) -> Result<Payload> {
        let options = with_entries(options, [("targets", Some(targets))]);
        self.execute(Operation::AssignGlobalPolicy, &options).await
    }

    /// Fetches appliance status fields.
    ///
    /// # Errors
    ///
    /// See [`FmgClient::execute`].
    pub async fn get_system_status(&self) -> Result<SystemStatus> {
        match self.execute(Operation::GetSystemStatus, &OptionBag::new()).await? {
            Payload::Status(status) => Ok(status),
            other => Err(FmgError::Parse(format!("expected system status, got {other:?}"))),
        }
    }

    parameterless_operations! {
        /// Lists ADOMs.
        get_adom_list => GetAdomList;
        /// Lists device licenses.
        get_device_license_list => GetDeviceLicenseList;
        /// Fetches the analyzer configuration.
        get_faz_config => GetFazConfig;
        /// Fetches the manager configuration.
        get_fmg_config => GetFmgConfig;
    }

    simple_operations! {
        /// Registers a device.
        add_device => AddDevice;
        /// Creates a device group.
        add_group => AddGroup;
        /// Creates a CLI script.
        create_script => CreateScript;
        /// Deletes an ADOM by name or object id.
        delete_adom => DeleteAdom;
        /// Deletes a configuration revision.
        delete_config_rev => DeleteConfigRev;
        /// Deletes a device.
        delete_device => DeleteDevice;
        /// Deletes a device group.
        delete_group => DeleteGroup;
        /// Deletes a script. Succeeds with `"0"`.
        delete_script => DeleteScript;
        /// Adds or removes group members.
        edit_group_membership => EditGroupMembership;
        /// Looks up an ADOM by name.
        get_adom_by_name => GetAdomByName;
        /// Looks up an ADOM by object id.
        get_adom_by_oid => GetAdomByOid;
        /// Fetches a configuration revision.
        get_config => GetConfig;
        /// Lists configuration revisions, with optional date and number filters.
        get_config_revision_history => GetConfigRevisionHistory;
        /// Looks up a device.
        get_device => GetDevice;
        /// Lists devices in an ADOM.
        get_device_list => GetDeviceList;
        /// Lists a device's VDOMs.
        get_device_vdom_list => GetDeviceVdomList;
        /// Fetches an archived analyzer file.
        get_faz_archive => GetFazArchive;
        /// Fetches a generated analyzer report.
        get_faz_generated_report => GetFazGeneratedReport;
        /// Lists device groups in an ADOM.
        get_group_list => GetGroupList;
        /// Looks up device groups by name or id.
        get_group => GetGroup;
        /// Fetches installation logs.
        get_instlog => GetInstlog;
        /// Lists policy packages.
        get_package_list => GetPackageList;
        /// Fetches a script.
        get_script => GetScript;
        /// Fetches a script execution log.
        get_script_log => GetScriptLog;
        /// Summarizes script logs for one device.
        get_script_log_summary => GetScriptLogSummary;
        /// Fetches a task.
        get_task_detail => GetTaskDetail;
        /// Imports device policy into an ADOM.
        import_policy => ImportPolicy;
        /// Installs a policy package.
        install_config => InstallConfig;
        /// Lists generated analyzer reports.
        list_faz_generated_reports => ListFazGeneratedReports;
        /// Lists configuration revision ids.
        list_revision_id => ListRevisionId;
        /// Deletes an archived analyzer file.
        remove_faz_archive => RemoveFazArchive;
        /// Retrieves a device's running configuration.
        retrieve_config => RetrieveConfig;
        /// Reverts a device to a configuration revision.
        revert_config => RevertConfig;
        /// Runs an analyzer report.
        run_faz_report => RunFazReport;
        /// Runs a script on a device.
        run_script => RunScript;
        /// Searches analyzer logs. The payload is the log data.
        search_faz_log => SearchFazLog;
        /// Replaces the analyzer configuration.
        set_faz_config => SetFazConfig;
        /// Replaces the manager configuration.
        set_fmg_config => SetFmgConfig;
    }
}
